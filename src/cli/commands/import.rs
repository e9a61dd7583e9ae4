//! Import command: batch import with a progress bar and a summary

use crate::app::services::batch_import::{BatchImporter, ImportStatus, ImportSummary};
use crate::app::services::model_schema::load_schema;
use crate::app::services::progress::ProgressUpdate;
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::cli::commands::shared::{
    create_progress_bar, load_configuration, print_json, run_blocking, setup_logging,
};
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Prefix of the batch-level progress activities
const IMPORT_ACTIVITY_PREFIX: &str = "Import";

/// Run the import command
pub async fn run_import(args: &ImportArgs, cancellation: CancellationToken) -> Result<()> {
    setup_logging(&args.common)?;
    args.common.validate()?;

    let mut config = load_configuration(&args.common)?;
    if args.no_recursive {
        config = config.without_recursion();
    }
    if args.fail_fast {
        config = config.with_fail_fast();
    }

    let mut importer = BatchImporter::new(config);
    if let Some(schema_path) = &args.schema {
        importer = importer.with_schema(load_schema(schema_path)?);
    }

    let progress_bar = args
        .common
        .show_progress()
        .then(|| create_progress_bar(0, "Importing"));
    let bar = progress_bar.clone();
    let inputs = args.paths.clone();
    let token = cancellation.clone();
    let start_time = Instant::now();

    info!("Importing {} input paths", inputs.len());
    let summary = run_blocking(move || {
        let mut on_progress = |update: &ProgressUpdate| {
            if let Some(bar) = &bar {
                if update.activity.starts_with(IMPORT_ACTIVITY_PREFIX) {
                    bar.set_length(update.total as u64);
                    bar.set_position(update.current as u64);
                    bar.set_message(update.activity.clone());
                }
            }
        };
        importer.import(&inputs, &mut on_progress, &token)
    })
    .await;

    if let Some(bar) = &progress_bar {
        bar.finish_and_clear();
    }
    let summary = summary?;
    let elapsed = start_time.elapsed();

    match args.common.output_format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Human if !args.common.quiet => print_import_summary(&summary, elapsed),
        OutputFormat::Human => {}
    }

    if summary.cancelled {
        return Err(Error::cancelled("Import interrupted by user"));
    }
    Ok(())
}

fn print_import_summary(summary: &ImportSummary, elapsed: std::time::Duration) {
    println!();
    println!("{}", "Import Summary".bright_green().bold());
    println!("{}", "==============".bright_green());

    for file in &summary.files {
        let status = match file.status {
            ImportStatus::Imported => "imported".bright_green(),
            ImportStatus::Skipped => "skipped".bright_yellow(),
            ImportStatus::Failed => "failed".bright_red(),
        };
        let kind = file
            .kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {:<9} {:<28} {} ({} items)",
            status,
            kind,
            file.path.display(),
            file.items
        );
        if let Some(message) = &file.message {
            println!("            {}", message.dimmed());
        }
    }

    println!();
    println!(
        "{} {}/{}",
        "Files imported:".bright_cyan(),
        summary.imported_count().to_string().bright_white(),
        summary.total_files.to_string().bright_white()
    );
    println!(
        "{} {}",
        "Items read:".bright_cyan(),
        summary.total_items().to_string().bright_white()
    );
    println!(
        "{} {}",
        "Warnings:".bright_cyan(),
        summary.warning_count().to_string().bright_white()
    );
    if summary.skipped_count() > 0 {
        println!(
            "{} {}",
            "Files skipped:".bright_yellow(),
            summary.skipped_count()
        );
    }
    if summary.failed_count() > 0 {
        println!(
            "{} {}",
            "Files failed:".bright_red().bold(),
            summary.failed_count().to_string().bright_red().bold()
        );
    }
    if summary.cancelled {
        println!("{}", "Import was cancelled before all files were read".bright_red());
    }
    println!(
        "{} {:.2}s",
        "Processing time:".bright_cyan(),
        elapsed.as_secs_f64()
    );
}
