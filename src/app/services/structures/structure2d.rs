//! Flat property bag of one structure section

use serde::Serialize;

use crate::Result;
use crate::app::services::model_schema::{ModelPropertyDefinition, PropertyValue};
use crate::constants::structure_keys;

/// Structure type named by the `type` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Structure2DType {
    Pump,
    Weir,
    Gate,
    GeneralStructure,
    LeveeBreach,
    InvalidType,
}

impl Structure2DType {
    /// Resolve a type name, ignoring case; unknown names give `InvalidType`
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pump" => Self::Pump,
            "weir" => Self::Weir,
            "gate" => Self::Gate,
            "generalstructure" => Self::GeneralStructure,
            "dambreak" => Self::LeveeBreach,
            _ => Self::InvalidType,
        }
    }

    /// Type name as written in structure files
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Pump => "pump",
            Self::Weir => "weir",
            Self::Gate => "gate",
            Self::GeneralStructure => "generalstructure",
            Self::LeveeBreach => "dambreak",
            Self::InvalidType => "invalid",
        }
    }
}

/// A property with its schema definition, file text and parsed value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub definition: ModelPropertyDefinition,

    /// Value text as found in the file
    pub raw: String,

    /// Parsed value, none when the text is empty
    pub value: Option<PropertyValue>,

    /// 1-based line in the source file, 0 when built in memory
    pub line: usize,
}

impl Property {
    /// Parse `raw` with the data type of `definition`
    pub fn new(definition: ModelPropertyDefinition, raw: &str, line: usize) -> Result<Self> {
        let raw = raw.trim().to_string();
        let value = if raw.is_empty() {
            None
        } else {
            Some(definition.data_type.parse_value(&raw)?)
        };

        Ok(Self {
            definition,
            raw,
            value,
            line,
        })
    }

    pub fn key(&self) -> &str {
        &self.definition.file_key
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// One structure definition before conversion to a typed structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure2D {
    /// The `type` text as declared in the file
    pub declared_type: String,

    pub structure_type: Structure2DType,

    /// 1-based line of the section header, 0 when built in memory
    pub line: usize,

    properties: Vec<Property>,
}

impl Structure2D {
    pub fn new(declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        Self {
            structure_type: Structure2DType::from_type_name(&declared_type),
            declared_type,
            line: 0,
            properties: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// First property with this key, ignoring case
    pub fn get_property(&self, key: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.key().eq_ignore_ascii_case(key))
    }

    /// Whether the property exists with a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        self.get_property(key)
            .is_some_and(|property| !property.is_empty())
    }

    /// Structure name from the `id` property
    pub fn name(&self) -> Option<&str> {
        self.get_property(structure_keys::ID)
            .map(|property| property.raw.as_str())
            .filter(|name| !name.is_empty())
    }
}
