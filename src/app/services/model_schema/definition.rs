//! Property definitions, groups and the schema lookup

use serde::Serialize;
use std::collections::HashMap;

use super::data_type::{DataType, PropertyValue};

/// Definition of one model or structure property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPropertyDefinition {
    /// Key as written in model files
    pub file_key: String,
    pub caption: String,
    pub data_type: DataType,
    /// Default value text, empty when the property has no default
    pub default_value: String,
    pub min_value: String,
    pub max_value: String,
    /// Group the property is shown in
    pub category: String,
    pub subcategory: String,
    /// Structure type the property belongs to, empty for model properties
    pub structure_type: String,
    pub description: String,
    pub unit: String,
    /// 1-based line in the schema file
    pub line: usize,
}

impl ModelPropertyDefinition {
    /// Plain text definition for a key the schema does not describe
    pub fn text(file_key: impl Into<String>, structure_type: impl Into<String>) -> Self {
        let file_key = file_key.into();
        Self {
            caption: file_key.clone(),
            file_key,
            data_type: DataType::String,
            default_value: String::new(),
            min_value: String::new(),
            max_value: String::new(),
            category: String::new(),
            subcategory: String::new(),
            structure_type: structure_type.into(),
            description: String::new(),
            unit: String::new(),
            line: 0,
        }
    }

    /// Typed default value, none when absent or unreadable
    pub fn default_typed_value(&self) -> Option<PropertyValue> {
        if self.default_value.trim().is_empty() {
            return None;
        }
        self.data_type.parse_value(&self.default_value).ok()
    }

    pub fn is_structure_property(&self) -> bool {
        !self.structure_type.is_empty()
    }
}

/// Definitions sharing a category, in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPropertyGroup {
    pub name: String,
    pub definitions: Vec<ModelPropertyDefinition>,
}

/// All definitions of a schema file with case-insensitive lookup
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelSchema {
    groups: Vec<ModelPropertyGroup>,
    #[serde(skip)]
    index: HashMap<(String, String), (usize, usize)>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition to the group of its category; returns false and keeps
    /// the existing definition when the key is already defined for its structure type
    pub fn add_definition(&mut self, definition: ModelPropertyDefinition) -> bool {
        let lookup = Self::lookup_key(&definition.structure_type, &definition.file_key);
        if self.index.contains_key(&lookup) {
            return false;
        }

        let group_index = match self
            .groups
            .iter()
            .position(|group| group.name == definition.category)
        {
            Some(index) => index,
            None => {
                self.groups.push(ModelPropertyGroup {
                    name: definition.category.clone(),
                    definitions: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[group_index];
        group.definitions.push(definition);
        self.index
            .insert(lookup, (group_index, group.definitions.len() - 1));
        true
    }

    /// Model property by key, ignoring case
    pub fn definition(&self, key: &str) -> Option<&ModelPropertyDefinition> {
        self.structure_definition("", key)
    }

    /// Structure property by structure type and key, ignoring case
    pub fn structure_definition(
        &self,
        structure_type: &str,
        key: &str,
    ) -> Option<&ModelPropertyDefinition> {
        let (group, position) = self.index.get(&Self::lookup_key(structure_type, key))?;
        self.groups.get(*group)?.definitions.get(*position)
    }

    /// Groups in order of first appearance of their category
    pub fn groups(&self) -> &[ModelPropertyGroup] {
        &self.groups
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ModelPropertyDefinition> {
        self.groups.iter().flat_map(|group| group.definitions.iter())
    }

    /// Structure types with at least one definition, in file order
    pub fn structure_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for definition in self.definitions() {
            let structure_type = definition.structure_type.to_ascii_lowercase();
            if !structure_type.is_empty() && !types.contains(&structure_type) {
                types.push(structure_type);
            }
        }
        types
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn lookup_key(structure_type: &str, key: &str) -> (String, String) {
        (structure_type.to_ascii_lowercase(), key.to_ascii_lowercase())
    }
}
