//! Model property schemas loaded from CSV
//!
//! A schema file describes every property a model or structure file may
//! contain: its key, data type, caption, default and grouping.
//!
//! ## Architecture
//!
//! - [`data_type`] - the `type` column grammar and typed value parsing and formatting
//! - [`definition`] - definitions, category groups and case-insensitive lookup
//! - [`loader`] - CSV reading with line-located schema errors
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::model_schema::parse_schema;
//!
//! # fn example() -> hydro_formats::Result<()> {
//! let csv = "key,type,caption,default,category,structuretype\n\
//!            capacity,steerable,Capacity,1.0,General,pump\n";
//! let schema = parse_schema(csv.as_bytes(), "structure-properties.csv")?;
//!
//! let definition = schema.structure_definition("Pump", "CAPACITY").unwrap();
//! assert_eq!(definition.caption, "Capacity");
//! assert_eq!(definition.default_typed_value().and_then(|v| v.as_f64()), Some(1.0));
//! # Ok(())
//! # }
//! ```

pub mod data_type;
pub mod definition;
pub mod loader;

#[cfg(test)]
pub mod tests;

pub use data_type::{DataType, EnumChoice, PropertyValue};
pub use definition::{ModelPropertyDefinition, ModelPropertyGroup, ModelSchema};
pub use loader::{bundled_structure_schema, load_schema, parse_schema};
