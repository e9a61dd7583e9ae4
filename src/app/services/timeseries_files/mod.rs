//! Time-series file readers and writers
//!
//! ## Architecture
//!
//! - [`tim`] - `.tim` rows of minutes since the reference date and values
//! - [`t3d`] - `.t3d` layered profiles with `TIME = ... since ...` blocks
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hydro_formats::app::services::timeseries_files::TimFile;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let reference = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let series = TimFile::new(reference).parse_content("0 1.5\n60 2.0\n", "pump.tim")?;
//!
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.component(0), vec![1.5, 2.0]);
//! # Ok(())
//! # }
//! ```

pub mod t3d;
pub mod tim;

#[cfg(test)]
pub mod tests;

pub use t3d::{LayerType, T3dData, T3dFile, TimeUnit};
pub use tim::TimFile;
