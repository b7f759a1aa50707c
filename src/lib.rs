pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Direction, RateLoader};
use crate::providers::DatosGovProvider;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, info};

pub enum AppCommand {
    Show { json: bool },
    Convert { amount: String, direction: Direction },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("TRM starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = DatosGovProvider::new(&config.provider.base_url, &config.provider.dataset);
    let mut loader = RateLoader::start(Arc::new(provider));

    match command {
        AppCommand::Show { json } => cli::show::run(&mut loader, json).await,
        AppCommand::Convert { amount, direction } => {
            cli::convert::run(&mut loader, &amount, direction).await
        }
        AppCommand::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            cli::interactive::run(&mut loader, stdin, &mut stdout).await
        }
    }
}
