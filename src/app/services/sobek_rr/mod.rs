//! Sobek rainfall-runoff record readers
//!
//! Each Sobek RR input file holds blocks of one record kind, for example
//! `PAVED.3B` holds `PAVE ... pave` blocks and `UNPAVED.STO` holds
//! `STDF ... stdf` blocks.
//!
//! ## Architecture
//!
//! - [`records`] - one record type per block kind, built from labelled fields
//! - [`reader`] - file scanning, per-block error recovery and file kind detection
//! - [`stats`] - parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::sobek_rr::{SobekRrReader, StorageRecord};
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let reader = SobekRrReader::default();
//! let result = reader.parse_content::<StorageRecord>(
//!     "STDF id 'S1' nm 'Storage1' ml 5.0 il 0.0 stdf",
//!     "UNPAVED.STO",
//! )?;
//!
//! assert_eq!(result.records[0].max_land_storage, Some(5.0));
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod records;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use reader::{SobekFileKind, SobekRecords, SobekRrReader};
pub use records::{
    BoundaryLevel, BoundaryRecord, DrainageComputation, GreenhouseRecord, InfiltrationRecord,
    NodeRecord, PavedRecord, SeepageRecord, SewerPumpCapacity, SobekRecord, StorageRecord,
    UnpavedRecord,
};
pub use stats::{BlockStats, ParseResult, SkippedBlock};
