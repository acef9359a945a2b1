pub mod convert;
pub mod demo;
pub mod rates;
pub mod setup;
pub mod ui;
