//! Batch importer

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::detection::{FileKind, collect_files};
use crate::app::models::{Feature2D, Structure, TimeSeries};
use crate::app::services::geometry_files::{
    NamedPoint, PliFile, PointValue, PolFile, PolFileOptions, read_xyn, read_xyz,
};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::model_schema::ModelSchema;
use crate::app::services::progress::ProgressUpdate;
use crate::app::services::sobek_rr::{SobekRecords, SobekRrReader};
use crate::app::services::structures::StructuresFile;
use crate::app::services::timeseries_files::{T3dData, T3dFile, TimFile};
use crate::config::ReaderConfig;
use crate::{Error, Result};

/// Content of one imported file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ImportedData {
    Sobek(SobekRecords),
    Features(Vec<Feature2D>),
    Samples(Vec<PointValue>),
    NamedPoints(Vec<NamedPoint>),
    TimeSeries(TimeSeries),
    LayeredTimeSeries(T3dData),
    Structures(Vec<Structure>),
}

impl ImportedData {
    /// Number of records, features, points, rows or structures
    pub fn item_count(&self) -> usize {
        match self {
            Self::Sobek(records) => records.len(),
            Self::Features(features) => features.len(),
            Self::Samples(points) => points.len(),
            Self::NamedPoints(points) => points.len(),
            Self::TimeSeries(series) => series.len(),
            Self::LayeredTimeSeries(data) => data.series.len(),
            Self::Structures(structures) => structures.len(),
        }
    }
}

/// One file read successfully
#[derive(Debug, Clone, Serialize)]
pub struct ImportedFile {
    pub kind: FileKind,
    pub data: ImportedData,
    /// Problems that did not stop the file from being read
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Imported,
    Skipped,
    Failed,
}

/// Outcome of one file of a batch
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    pub status: ImportStatus,
    pub items: usize,
    pub warnings: Vec<String>,
    /// Failure or skip reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub data: Option<ImportedData>,
}

impl FileOutcome {
    fn imported(path: &Path, file: ImportedFile) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: Some(file.kind),
            status: ImportStatus::Imported,
            items: file.data.item_count(),
            warnings: file.warnings,
            message: None,
            data: Some(file.data),
        }
    }

    fn not_imported(
        path: &Path,
        kind: Option<FileKind>,
        status: ImportStatus,
        message: String,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            status,
            items: 0,
            warnings: Vec::new(),
            message: Some(message),
            data: None,
        }
    }
}

/// Per-file outcomes of a batch, in import order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub files: Vec<FileOutcome>,

    /// Files found by expanding the inputs
    pub total_files: usize,

    /// Whether the batch stopped on cancellation before all files were read
    pub cancelled: bool,
}

impl ImportSummary {
    pub fn imported_count(&self) -> usize {
        self.count(ImportStatus::Imported)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(ImportStatus::Skipped)
    }

    pub fn failed_count(&self) -> usize {
        self.count(ImportStatus::Failed)
    }

    /// Items read over all imported files
    pub fn total_items(&self) -> usize {
        self.files.iter().map(|file| file.items).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|file| file.warnings.len()).sum()
    }

    /// Check if every file of the batch was imported
    pub fn is_successful(&self) -> bool {
        !self.cancelled && self.imported_count() == self.total_files
    }

    fn count(&self, status: ImportStatus) -> usize {
        self.files
            .iter()
            .filter(|file| file.status == status)
            .count()
    }
}

/// Reads many files of mixed kinds, one at a time
#[derive(Debug, Clone, Default)]
pub struct BatchImporter {
    config: ReaderConfig,
    schema: Option<ModelSchema>,
}

impl BatchImporter {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            schema: None,
        }
    }

    /// Structure schema used for `.ini` files; without one they are skipped
    pub fn with_schema(mut self, schema: ModelSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Import all files named by `inputs`
    ///
    /// Directories and glob patterns are expanded first. Cancellation is checked
    /// before each file; a cancelled batch returns the outcomes so far. A failing
    /// file is recorded and the batch continues, unless the configuration asks to
    /// stop at the first failure.
    pub fn import(
        &self,
        inputs: &[PathBuf],
        progress: &mut dyn FnMut(&ProgressUpdate),
        cancellation: &CancellationToken,
    ) -> Result<ImportSummary> {
        let files = collect_files(inputs, self.config.import.recursive)?;
        let mut summary = ImportSummary {
            total_files: files.len(),
            ..ImportSummary::default()
        };
        info!("Importing {} files", files.len());

        for (index, path) in files.iter().enumerate() {
            if cancellation.is_cancelled() {
                warn!("Import cancelled after {} of {} files", index, files.len());
                summary.cancelled = true;
                return Ok(summary);
            }

            progress(&ProgressUpdate::new(
                format!("Importing {}", path.display()),
                index,
                files.len(),
            ));

            let outcome = match FileKind::detect(path) {
                None => FileOutcome::not_imported(
                    path,
                    None,
                    ImportStatus::Skipped,
                    "Unrecognized file type".to_string(),
                ),
                Some(FileKind::Structures) if self.schema.is_none() => FileOutcome::not_imported(
                    path,
                    Some(FileKind::Structures),
                    ImportStatus::Skipped,
                    "No structure schema given".to_string(),
                ),
                Some(kind) => match self.read_file(path, progress) {
                    Ok(file) => FileOutcome::imported(path, file),
                    Err(e) => {
                        error!("Failed to import {}: {}", path.display(), e);
                        if !self.config.import.continue_on_error {
                            return Err(e);
                        }
                        FileOutcome::not_imported(path, Some(kind), ImportStatus::Failed, e.to_string())
                    }
                },
            };
            summary.files.push(outcome);
        }

        progress(&ProgressUpdate::new("Import finished", files.len(), files.len()));
        info!(
            "Imported {} of {} files ({} skipped, {} failed)",
            summary.imported_count(),
            summary.total_files,
            summary.skipped_count(),
            summary.failed_count()
        );
        Ok(summary)
    }

    /// Read one file of a recognized kind
    pub fn read_file(
        &self,
        path: &Path,
        progress: &mut dyn FnMut(&ProgressUpdate),
    ) -> Result<ImportedFile> {
        let kind = FileKind::detect(path).ok_or_else(|| {
            Error::invalid_argument(format!("Unrecognized file type of {}", path.display()))
        })?;
        let mut log = LogHandler::new(format!("importing {}", path.display()));
        let geometry = &self.config.geometry;

        let data = match kind {
            FileKind::Sobek(_) => {
                let (records, stats) = SobekRrReader::new(&self.config.sobek).read_known_file(path)?;
                for block in &stats.skipped {
                    log.report_warning(block.to_string());
                }
                ImportedData::Sobek(records)
            }
            FileKind::Polyline | FileKind::PolylineZ => ImportedData::Features(
                PliFile::for_path(path, geometry).read(path, &mut log, progress)?,
            ),
            FileKind::Polygon => ImportedData::Features(
                PolFile::new(PolFileOptions::from(geometry)).read(path, progress)?,
            ),
            FileKind::Samples => ImportedData::Samples(read_xyz(path)?),
            FileKind::NamedPoints => ImportedData::NamedPoints(read_xyn(path)?),
            FileKind::TimeSeries => {
                ImportedData::TimeSeries(TimFile::new(self.config.reference_date).read(path)?)
            }
            FileKind::LayeredTimeSeries => ImportedData::LayeredTimeSeries(T3dFile.read(path)?),
            FileKind::Structures => {
                let schema = self.schema.as_ref().ok_or_else(|| {
                    Error::configuration("Reading structures files requires a structure schema")
                })?;
                ImportedData::Structures(
                    StructuresFile::new(schema, &self.config).read_with_log(path, &mut log)?,
                )
            }
        };

        log.log_report();
        let mut warnings = log.warnings().to_vec();
        warnings.extend(log.errors().iter().cloned());
        Ok(ImportedFile {
            kind,
            data,
            warnings,
        })
    }
}
