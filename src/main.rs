use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use trm::core::Direction;
use trm::core::log::init_logging;

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

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// US dollars to Colombian pesos
    UsdCop,
    /// Colombian pesos to US dollars
    CopUsd,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Direction {
        match arg {
            DirectionArg::UsdCop => Direction::UsdToCop,
            DirectionArg::CopUsd => Direction::CopToUsd,
        }
    }
}

impl From<Commands> for trm::AppCommand {
    fn from(cmd: Commands) -> trm::AppCommand {
        match cmd {
            Commands::Show { json } => trm::AppCommand::Show { json },
            Commands::Convert { amount, direction } => trm::AppCommand::Convert {
                amount,
                direction: direction.into(),
            },
            Commands::Interactive => trm::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the current TRM (default)
    Show {
        /// Print the rate as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount with the current TRM
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long, value_enum, default_value_t = DirectionArg::UsdCop)]
        direction: DirectionArg,
    },
    /// Interactive converter
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Show { json: false });
    let result = match command {
        Commands::Setup => trm::cli::setup::setup(),
        cmd => trm::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
