use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use exr::core::PIVOT_CURRENCY;
use exr::core::log::init_logging;

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

impl From<Commands> for exr::AppCommand {
    fn from(cmd: Commands) -> exr::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => exr::AppCommand::Convert { amount, from, to },
            Commands::Rate {
                numerator,
                denominator,
            } => exr::AppCommand::Rate {
                numerator,
                denominator,
            },
            Commands::Currencies => exr::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount from one currency to another
    Convert {
        /// Amount expressed in the source currency
        amount: String,
        /// Source currency (ISO 4217 code)
        from: String,
        /// Target currency (ISO 4217 code)
        #[arg(default_value = PIVOT_CURRENCY)]
        to: String,
    },
    /// Display the exchange rate numerator/denominator
    Rate {
        numerator: String,
        #[arg(default_value = PIVOT_CURRENCY)]
        denominator: String,
    },
    /// List supported currency codes
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => exr::cli::setup::setup(),
        Some(cmd) => exr::run_command(cmd.into(), cli.config_path.as_deref(), cli.verbose).await,
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
