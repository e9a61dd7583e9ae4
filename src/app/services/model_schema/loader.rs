//! CSV schema loading
//!
//! The first row names the columns; `key` and `type` are required, all other
//! columns are optional and may appear in any order.

use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::data_type::DataType;
use super::definition::{ModelPropertyDefinition, ModelSchema};
use crate::constants::schema_columns;
use crate::{Error, Result};

/// Column positions found in the header row
#[derive(Debug, Clone)]
struct SchemaColumns {
    name_to_index: HashMap<String, usize>,
}

impl SchemaColumns {
    fn analyze(headers: &StringRecord, source_name: &str) -> Result<Self> {
        let name_to_index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.trim().to_ascii_lowercase(), index))
            .collect();

        for required in [schema_columns::KEY, schema_columns::TYPE] {
            if !name_to_index.contains_key(required) {
                return Err(Error::schema(
                    source_name,
                    1,
                    format!("Missing required column '{}'", required),
                ));
            }
        }

        Ok(Self { name_to_index })
    }

    /// Trimmed field of a column, empty when the column or field is absent
    fn field<'a>(&self, record: &'a StringRecord, column: &str) -> &'a str {
        self.name_to_index
            .get(column)
            .and_then(|index| record.get(*index))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Load a schema file
pub fn load_schema(path: &Path) -> Result<ModelSchema> {
    info!("Loading model schema {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::file_not_found(path.display().to_string()),
        _ => Error::io(format!("Failed to open {}", path.display()), e),
    })?;
    parse_schema(file, &path.display().to_string())
}

/// Structure schema shipped with the crate
const BUNDLED_STRUCTURE_SCHEMA: &str = include_str!("../../../../data/structure-properties.csv");

/// Parse the structure schema shipped with the crate
pub fn bundled_structure_schema() -> Result<ModelSchema> {
    parse_schema(BUNDLED_STRUCTURE_SCHEMA.as_bytes(), "structure-properties.csv")
}

/// Parse a schema from any reader
pub fn parse_schema<R: Read>(reader: R, source_name: &str) -> Result<ModelSchema> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::csv_parsing(source_name, "Failed to read CSV headers", Some(e)))?
        .clone();
    let columns = SchemaColumns::analyze(&headers, source_name)?;

    let mut schema = ModelSchema::new();
    for result in csv_reader.records() {
        let record = result
            .map_err(|e| Error::csv_parsing(source_name, "Failed to read schema row", Some(e)))?;
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(0);

        let key = columns.field(&record, schema_columns::KEY);
        if key.is_empty() {
            debug!("Skipping schema row without key on line {}", line);
            continue;
        }

        let (data_type, caption) = DataType::from_schema(
            columns.field(&record, schema_columns::TYPE),
            columns.field(&record, schema_columns::CAPTION),
        )
        .map_err(|message| Error::schema(source_name, line, message))?;

        let definition = ModelPropertyDefinition {
            file_key: key.to_string(),
            caption: if caption.is_empty() { key.to_string() } else { caption },
            data_type,
            default_value: columns.field(&record, schema_columns::DEFAULT).to_string(),
            min_value: columns.field(&record, schema_columns::MIN).to_string(),
            max_value: columns.field(&record, schema_columns::MAX).to_string(),
            category: columns.field(&record, schema_columns::CATEGORY).to_string(),
            subcategory: columns.field(&record, schema_columns::SUBCATEGORY).to_string(),
            structure_type: columns.field(&record, schema_columns::STRUCTURE_TYPE).to_string(),
            description: columns.field(&record, schema_columns::DESCRIPTION).to_string(),
            unit: columns.field(&record, schema_columns::UNIT).to_string(),
            line,
        };

        if !definition.default_value.is_empty() && definition.default_typed_value().is_none() {
            return Err(Error::schema(
                source_name,
                line,
                format!(
                    "Default value '{}' of '{}' is not {}",
                    definition.default_value,
                    definition.file_key,
                    definition.data_type.description()
                ),
            ));
        }

        if !schema.add_definition(definition) {
            warn!(
                "Duplicate definition of '{}' on line {} of {} is ignored",
                key, line, source_name
            );
        }
    }

    info!(
        "Loaded {} property definitions in {} groups from {}",
        schema.len(),
        schema.groups().len(),
        source_name
    );
    Ok(schema)
}
