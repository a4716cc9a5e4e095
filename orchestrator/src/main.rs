//! Main entry point for the run-orchestrator binary
//!
//! Wires the real services into the orchestrator and turns the outcome into
//! a process exit status: the processing tool's own status when it ran,
//! otherwise the failure's status.

use clap::Parser;

use run_orchestrator::{
    error::GENERIC_FAILURE_CODE,
    services::{RealConfigStore, RealDatasetSource, RealProcessRunner, RealToolLocator},
    CliArgs, Orchestrator, RunSettings,
};
use shared::{logging, step_debug, RunId, RunStep};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // .env is optional; real environment variables take precedence
    let _ = dotenv::dotenv();

    RunId::init();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup("medium-chunk demo run");

    let settings = match RunSettings::from_env(args) {
        Ok(settings) => settings,
        Err(err) => {
            logging::log_startup_error("Settings resolution", &err);
            std::process::exit(GENERIC_FAILURE_CODE);
        }
    };

    if let Ok(json) = serde_json::to_string(&settings) {
        logging::log_settings(&json);
    }

    // Initialize services
    let dataset = RealDatasetSource::new();
    let locator = RealToolLocator::from_source(&settings.tool, &settings.python);
    let config_store = RealConfigStore::new();
    let runner = RealProcessRunner::new();

    // Create orchestrator with dependency injection
    let orchestrator = Orchestrator::new(settings, dataset, locator, config_store, runner);

    let code = match orchestrator.run().await {
        Ok(report) => {
            step_debug!(
                RunStep::Invoke,
                "Run finished in {}s (downloaded: {})",
                report.elapsed().num_seconds(),
                report.downloaded
            );
            report.exit_code()
        }
        // Already logged against the failing step
        Err(err) => err.exit_code(),
    };

    std::process::exit(code);
}
