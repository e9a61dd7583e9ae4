//! Inspect command: read one file of any supported kind

use crate::app::services::batch_import::{BatchImporter, FileKind, ImportedData, ImportedFile};
use crate::app::services::progress::no_progress;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::cli::commands::shared::{
    load_configuration, load_structure_schema, print_json, run_blocking, setup_logging,
};
use crate::{Error, Result};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Most items listed per file in human output
const MAX_LISTED_ITEMS: usize = 20;

/// Run the inspect command
pub async fn run_inspect(args: &InspectArgs, cancellation: CancellationToken) -> Result<()> {
    setup_logging(&args.common)?;
    args.common.validate()?;

    let config = load_configuration(&args.common)?;
    let kind = FileKind::detect(&args.file).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unrecognized file type of {}",
            args.file.display()
        ))
    })?;

    let mut importer = BatchImporter::new(config);
    if kind == FileKind::Structures {
        importer = importer.with_schema(load_structure_schema(args.schema.as_deref())?);
    }

    info!("Inspecting {} ({})", args.file.display(), kind);
    let path = args.file.clone();
    let file = run_blocking(move || importer.read_file(&path, &mut no_progress)).await?;

    if cancellation.is_cancelled() {
        return Err(Error::cancelled("Inspection interrupted by user"));
    }

    match args.common.output_format {
        OutputFormat::Json => print_json(&file),
        OutputFormat::Human => {
            print_file_report(&args.file.display().to_string(), &file);
            Ok(())
        }
    }
}

fn print_file_report(path: &str, file: &ImportedFile) {
    println!();
    println!("{}", path.bright_green().bold());
    println!(
        "  {} {}",
        "File kind:".bright_cyan(),
        file.kind.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Items read:".bright_cyan(),
        file.data.item_count().to_string().bright_white()
    );

    for line in describe_items(&file.data).iter().take(MAX_LISTED_ITEMS) {
        println!("    {}", line);
    }
    if file.data.item_count() > MAX_LISTED_ITEMS {
        println!(
            "    {}",
            format!("... {} more", file.data.item_count() - MAX_LISTED_ITEMS).dimmed()
        );
    }

    if !file.warnings.is_empty() {
        println!(
            "  {} {}",
            "Warnings:".bright_yellow().bold(),
            file.warnings.len()
        );
        for warning in &file.warnings {
            println!("    {}", warning.yellow());
        }
    }
}

/// One line per item for human output
fn describe_items(data: &ImportedData) -> Vec<String> {
    match data {
        ImportedData::Sobek(records) => vec![format!("{} tagged records", records.len())],
        ImportedData::Features(features) => features
            .iter()
            .map(|feature| {
                format!(
                    "{} ({} points)",
                    feature.name,
                    feature.geometry.num_points()
                )
            })
            .collect(),
        ImportedData::Samples(points) => points
            .iter()
            .map(|point| {
                format!(
                    "({}, {}) = {}",
                    point.coordinate.x, point.coordinate.y, point.value
                )
            })
            .collect(),
        ImportedData::NamedPoints(points) => points
            .iter()
            .map(|point| {
                format!(
                    "{} at ({}, {})",
                    point.name, point.coordinate.x, point.coordinate.y
                )
            })
            .collect(),
        ImportedData::TimeSeries(series) => series
            .rows()
            .map(|(time, values)| format!("{} {:?}", time, values))
            .collect(),
        ImportedData::LayeredTimeSeries(data) => {
            let mut lines = vec![format!(
                "{} layers ({:?}), {} components per layer",
                data.layers.len(),
                data.layer_type,
                data.vector_max
            )];
            lines.extend(
                data.series
                    .rows()
                    .map(|(time, values)| format!("{} {:?}", time, values)),
            );
            lines
        }
        ImportedData::Structures(structures) => structures
            .iter()
            .map(|structure| format!("{} ({})", structure.name, structure.type_name()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Coordinate, Feature2D, Geometry};

    #[test]
    fn test_describe_features() {
        let geometry = Geometry::from_coordinates(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 0.0),
        ])
        .unwrap();
        let data = ImportedData::Features(vec![Feature2D::new("weir01", geometry)]);

        assert_eq!(describe_items(&data), vec!["weir01 (2 points)".to_string()]);
    }
}
