//! INI files as used by D-Flow FM structure definitions
//!
//! ```text
//! [structure]
//!     type                  = pump                # Type of structure
//!     id                    = pump01
//! ```
//!
//! ## Architecture
//!
//! - [`data`] - sections and properties with their source line numbers
//! - [`reader`] - parsing; properties outside a section are format errors
//! - [`writer`] - aligned `key = value # comment` output
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::ini::parse_ini;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let data = parse_ini("[structure]\ntype = pump # kind\nid = pump01\n", "structures.ini")?;
//! let section = &data.sections[0];
//!
//! assert_eq!(section.value("TYPE"), Some("pump"));
//! assert_eq!(section.property("id").map(|p| p.line), Some(3));
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use data::{IniData, IniProperty, IniSection};
pub use reader::{parse_ini, read_ini};
pub use writer::{format_property, write_ini, write_ini_to};
