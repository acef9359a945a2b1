use crate::core::ledger::TRANSACTION_TARGET;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    filter::{Directive, Targets},
    fmt::{self, MakeWriter},
    prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber, writing to stderr.
///
/// Application diagnostics are off unless `verbose` or `RUST_LOG` asks for
/// them. Transaction records on [`TRANSACTION_TARGET`] are always shown.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();
    build_subscriber(verbose, env_filter, std::io::stderr).init();
}

/// Builds the subscriber used by [`init_logging`] with an explicit env filter
/// and writer.
pub fn build_subscriber<W>(
    verbose: bool,
    env_filter: Option<EnvFilter>,
    make_writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let app_level = match (verbose, env_filter.is_some()) {
        (true, _) => LevelFilter::DEBUG,
        // RUST_LOG decides
        (false, true) => LevelFilter::TRACE,
        (false, false) => LevelFilter::OFF,
    };
    let app_filter = Targets::new()
        .with_target("fxconv", app_level)
        .with_target(TRANSACTION_TARGET, LevelFilter::INFO);

    let level = if verbose { "debug" } else { "off" };
    let mut env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(level));
    if let Ok(directive) = format!("{TRANSACTION_TARGET}=info").parse::<Directive>() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(make_writer),
        )
        .with(app_filter)
        .with(env_filter)
}
