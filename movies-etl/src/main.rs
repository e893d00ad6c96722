//! Movies ETL
//!
//! Entry point: loads settings, sets up logging and runs beats until ctrl-c
//! or a fatal error.

use std::process::ExitCode;

use tracing::{error, info};

use movies_etl::{logging, Dependencies, EtlError, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(settings.log_format);

    match run(&settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Movies ETL stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> Result<(), EtlError> {
    info!(log_format = %settings.log_format, "Starting movies ETL");

    let mut dependencies = Dependencies::new(settings).await?;
    dependencies.orchestrator.run().await?;

    Ok(())
}
