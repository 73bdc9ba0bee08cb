//! Cucumber HTML report - Main entry point.
//!
//! Reads its settings from the environment and writes the report once.

use cucumber_report_lib::config::Config;
use cucumber_report_lib::services::generate_report;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - INPUT_DIRECTORY must point at the Cucumber JSON results");
            error!("  - OUTPUT_DIRECTORY must be set to the report destination");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Cucumber HTML report");
    info!("  Input:  {}", config.report.json_dir.display());
    info!("  Output: {}", config.report.report_path.display());
    info!("========================================");

    if let Err(e) = generate_report(&config.report) {
        error!("Report generation failed: {}", e);
        std::process::exit(1);
    }
}
