//! Structures command: read, report and optionally rewrite a structures file

use crate::app::models::{Structure, StructureKind, TimeDependent};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::structures::StructuresFile;
use crate::cli::args::{OutputFormat, StructuresArgs};
use crate::cli::commands::shared::{
    load_configuration, load_structure_schema, print_json, run_blocking, setup_logging,
};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Structures read from one file with the problems reported on the way
#[derive(Debug, Clone, Serialize)]
pub struct StructuresReport {
    pub file: PathBuf,
    pub structures: Vec<Structure>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
}

/// Run the structures command
pub async fn run_structures(args: &StructuresArgs, cancellation: CancellationToken) -> Result<()> {
    setup_logging(&args.common)?;
    args.common.validate()?;

    let config = load_configuration(&args.common)?;
    let schema = load_structure_schema(args.schema.as_deref())?;
    let file = args.file.clone();
    let write_path = args.write_path.clone();

    let report = run_blocking(move || {
        let structures_file = StructuresFile::new(&schema, &config);
        let mut log = LogHandler::new(format!("reading the structures file ({})", file.display()));
        let structures = structures_file.read_with_log(&file, &mut log)?;
        log.log_report();

        if let Some(target) = &write_path {
            structures_file.write(target, &structures)?;
            info!("Structures written to {}", target.display());
        }

        Ok(StructuresReport {
            file,
            structures,
            warnings: log.warnings().to_vec(),
            errors: log.errors().to_vec(),
            written_to: write_path,
        })
    })
    .await?;

    if cancellation.is_cancelled() {
        return Err(Error::cancelled("Reading structures interrupted by user"));
    }

    match args.common.output_format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Human => {
            print_structures_report(&report);
            Ok(())
        }
    }
}

fn print_structures_report(report: &StructuresReport) {
    println!();
    println!("{}", "Structures Summary".bright_green().bold());
    println!("{}", "==================".bright_green());
    println!(
        "{} {}",
        "File:".bright_cyan(),
        report.file.display().to_string().bright_white()
    );
    println!(
        "{} {}",
        "Structures read:".bright_cyan(),
        report.structures.len().to_string().bright_white()
    );

    for structure in &report.structures {
        println!(
            "  {:<24} {:<18} {}",
            structure.name.bright_white(),
            structure.type_name(),
            describe_structure(structure)
        );
    }

    if !report.warnings.is_empty() {
        println!(
            "{} {}",
            "Warnings:".bright_yellow().bold(),
            report.warnings.len()
        );
        for warning in &report.warnings {
            println!("  {}", warning.yellow());
        }
    }

    if !report.errors.is_empty() {
        println!(
            "{} {}",
            "Skipped definitions:".bright_red().bold(),
            report.errors.len()
        );
        for error in &report.errors {
            println!("  {}", error.red());
        }
    }

    if let Some(target) = &report.written_to {
        println!(
            "{} {}",
            "Written to:".bright_cyan(),
            target.display().to_string().bright_white()
        );
    }
}

/// Key parameter of a structure for the summary table
fn describe_structure(structure: &Structure) -> String {
    match &structure.kind {
        StructureKind::Pump(pump) => format!("capacity {}", describe_value(&pump.capacity)),
        StructureKind::Weir(weir) => format!("crest level {}", describe_value(&weir.crest_level)),
        StructureKind::Gate(gate) => format!("sill level {}", describe_value(&gate.sill_level)),
        StructureKind::LeveeBreach(breach) => format!(
            "breach at ({}, {})",
            breach.breach_location.x, breach.breach_location.y
        ),
    }
}

fn describe_value(value: &TimeDependent) -> String {
    match value {
        TimeDependent::Constant(constant) => constant.to_string(),
        TimeDependent::Series(series) => format!("time series ({} rows)", series.len()),
    }
}
