use crate::acwm::HttpCommandChannel;
use crate::app_config::AppConfig;
use crate::cli::Cli;
use crate::orchestrator::Orchestrator;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};

mod acwm;
mod app_config;
mod cli;
mod domain;
mod orchestrator;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    tracing_subscriber::fmt().with_max_level(cli.log_level()).with_writer(io::stderr).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config_path = match cli.config.clone().map_or_else(AppConfig::default_path, Ok) {
        Ok(path) => path,
        Err(e) => {
            println!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Error loading config {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(address = %config.endpoint().address(), "✅ Loaded configuration");
    debug!(endpoint = ?config.endpoint());

    let client = match acwm::new_client(config.endpoint()) {
        Ok(client) => client,
        Err(e) => {
            println!("Error creating the HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let channel = HttpCommandChannel::new(client.clone(), config.endpoint());

    let outcome = Orchestrator::new(&client, &channel, config.endpoint(), io::stdout())
        .execute(cli.command.datapoint())
        .await;

    outcome.into()
}
