//! Geometry file readers and writers for D-Flow FM models
//!
//! ## Architecture
//!
//! - [`pli`] - `.pli` polylines and `.pliz` polylines with z, attribute columns,
//!   location names and `-999` sub-feature separators
//! - [`pol`] - `.pol` polygons, rings closed on read
//! - [`points`] - `.xyz` samples and `.xyn` named points
//!
//! Readers report format problems as [`crate::Error::Format`] with the file and
//! 1-based line, and report progress through a synchronous callback.
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::geometry_files::PliFile;
//! use hydro_formats::app::services::log_handler::LogHandler;
//! use hydro_formats::app::services::progress::no_progress;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let content = "weir01\n    2    2\n0.0 0.0\n10.0 5.0\n";
//! let mut log = LogHandler::new("reading weir01.pli");
//! let features = PliFile::default().parse_content(content, "weir01.pli", &mut log, &mut no_progress)?;
//!
//! assert_eq!(features[0].name, "weir01");
//! assert_eq!(features[0].geometry.num_points(), 2);
//! # Ok(())
//! # }
//! ```

pub mod pli;
pub mod points;
pub mod pol;

#[cfg(test)]
pub mod tests;

pub use pli::{PliFile, numeric_column_key};
pub use points::{
    NamedPoint, PointValue, parse_xyn, parse_xyz, read_xyn, read_xyz, write_xyn, write_xyz,
};
pub use pol::{PolFile, PolFileOptions};
