//! In-memory INI document

use serde::Serialize;

/// One `key = value # comment` line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IniProperty {
    pub key: String,
    pub value: String,
    /// Empty when the line has no comment
    pub comment: String,
    /// 1-based line in the source file, 0 for properties built in memory
    pub line: usize,
}

impl IniProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: comment.into(),
            line: 0,
        }
    }
}

/// A `[name]` section and its properties in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IniSection {
    pub name: String,
    pub line: usize,
    pub properties: Vec<IniProperty>,
}

impl IniSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: 0,
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, property: IniProperty) {
        self.properties.push(property);
    }

    /// First property with this key, ignoring case
    pub fn property(&self, key: &str) -> Option<&IniProperty> {
        self.properties
            .iter()
            .find(|property| property.key.eq_ignore_ascii_case(key))
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.property(key).map(|property| property.value.as_str())
    }

    /// Rename every property called `old_key`, ignoring case
    pub fn rename_property(&mut self, old_key: &str, new_key: &str) -> usize {
        let mut renamed = 0;
        for property in &mut self.properties {
            if property.key.eq_ignore_ascii_case(old_key) {
                property.key = new_key.to_string();
                renamed += 1;
            }
        }
        renamed
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// All sections of one INI file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IniData {
    pub sections: Vec<IniSection>,
}

impl IniData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, section: IniSection) {
        self.sections.push(section);
    }

    /// First section with this name, ignoring case
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.is_named(name))
    }

    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IniSection> {
        self.sections.iter().filter(move |section| section.is_named(name))
    }
}
