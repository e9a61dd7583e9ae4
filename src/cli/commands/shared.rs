//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, schema selection, progress bars
//! and JSON output used by more than one command.

use crate::app::services::model_schema::{ModelSchema, bundled_structure_schema, load_schema};
use crate::cli::args::CommonArgs;
use crate::config::ReaderConfig;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hydro_formats={}", log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: explicit file, else the user config file if present, else defaults
pub fn load_configuration(args: &CommonArgs) -> Result<ReaderConfig> {
    let default_config_path = if args.config_file.is_none() {
        ReaderConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    let mut config = match config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ReaderConfig::load(path)?
        }
        None => {
            info!("No config file found, using defaults");
            ReaderConfig::default()
        }
    };

    // Apply CLI argument overrides
    if let Some(reference_date) = args.reference_date {
        config = config.with_reference_date(reference_date);
    }

    config.validate()?;
    Ok(config)
}

/// Schema from a file, or the structure schema shipped with the crate
pub fn load_structure_schema(path: Option<&Path>) -> Result<ModelSchema> {
    match path {
        Some(path) => load_schema(path),
        None => {
            debug!("Using the bundled structure schema");
            bundled_structure_schema()
        }
    }
}

/// Run blocking file work off the async runtime
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::cancelled(format!("Worker task did not complete: {}", e)))?
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
