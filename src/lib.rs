pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Interactive,
    Convert {
        amount: String,
        from: String,
        to: Vec<String>,
    },
    List {
        search: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = Arc::new(providers::ExchangeRateApiProvider::new(
        &config.provider.base_url,
    ));

    match command {
        AppCommand::Interactive => cli::interactive::run(&config, provider).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&amount, &from, &to, provider.as_ref()).await
        }
        AppCommand::List { search } => cli::list::run(search.as_deref()),
    }
}
