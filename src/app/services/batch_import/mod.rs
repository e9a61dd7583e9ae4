//! Batch import of model files
//!
//! Imports any mix of Sobek RR files, geometry files, time series and
//! structures files, one file at a time.
//!
//! ## Architecture
//!
//! - [`detection`] - file kind detection by Sobek RR name or extension, and
//!   expansion of directories (via `walkdir`) and glob patterns
//! - [`importer`] - the importer with per-file outcomes, a synchronous progress
//!   callback and a cancellation token checked between files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hydro_formats::app::services::batch_import::BatchImporter;
//! use hydro_formats::app::services::progress::no_progress;
//! use hydro_formats::ReaderConfig;
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let importer = BatchImporter::new(ReaderConfig::default());
//! let summary = importer.import(
//!     &[PathBuf::from("model/")],
//!     &mut no_progress,
//!     &CancellationToken::new(),
//! )?;
//!
//! println!("{} of {} files imported", summary.imported_count(), summary.total_files);
//! # Ok(())
//! # }
//! ```

pub mod detection;
pub mod importer;

#[cfg(test)]
pub mod tests;

pub use detection::{FileKind, collect_files};
pub use importer::{
    BatchImporter, FileOutcome, ImportStatus, ImportSummary, ImportedData, ImportedFile,
};
