use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use counter_rebase::cli::Cli;
use counter_rebase::config::{load_config, print_schema};
use counter_rebase::startup::execute;
use counter_rebase::utils::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_schema {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match execute(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Counter rebase failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
