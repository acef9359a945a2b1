use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                from,
                to,
                amount,
                json,
            } => fxconv::AppCommand::Convert {
                from,
                to,
                amount,
                json,
            },
            Commands::Rates => fxconv::AppCommand::Rates,
            Commands::Demo => fxconv::AppCommand::Demo,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code, e.g. USD
        from: String,
        /// Destination currency code, e.g. EUR
        to: String,
        /// Amount in the source currency
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display the active exchange rates
    Rates,
    /// Run the sample conversions
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
