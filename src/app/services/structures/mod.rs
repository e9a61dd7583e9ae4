//! D-Flow FM structures files
//!
//! A structures file is an `.ini` file with a `[General]` header and one
//! `[structure]` section per pump, weir, general structure, gate or levee
//! breach. Property keys and value types come from a [`ModelSchema`]
//! loaded from the structure-properties CSV.
//!
//! ## Architecture
//!
//! - [`structure2d`] - the flat property bag of one section with typed values
//! - [`validator`] - geometry and type-specific consistency checks
//! - [`factory`] - conversion of definitions into typed [`Structure`]s, reading
//!   `.tim` and `.pli` companion files
//! - [`file`] - reading with legacy key renames, header checks and warning
//!   collection; writing with companion files
//! - [`writer`] - section building for one typed structure
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hydro_formats::app::services::model_schema::load_schema;
//! use hydro_formats::app::services::structures::StructuresFile;
//! use hydro_formats::ReaderConfig;
//! use std::path::Path;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let schema = load_schema(Path::new("data/structure-properties.csv"))?;
//! let config = ReaderConfig::default();
//!
//! let structures = StructuresFile::new(&schema, &config).read(Path::new("model/structures.ini"))?;
//! for structure in &structures {
//!     println!("{} ({})", structure.name, structure.type_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`ModelSchema`]: crate::app::services::model_schema::ModelSchema
//! [`Structure`]: crate::app::models::Structure

pub mod factory;
pub mod file;
pub mod structure2d;
pub mod validator;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use factory::StructureFactory;
pub use file::StructuresFile;
pub use structure2d::{Property, Structure2D, Structure2DType};
pub use validator::StructureValidator;
pub use writer::{SectionWriter, general_section};
