//! Test utilities and fixtures for INI testing

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

pub fn create_ini_content() -> String {
    r#"# structures of the harbour model
[General]
    fileVersion           = 2.00
    fileType              = structure

[structure]
    type                  = pump                # Type of structure
    id                    = pump01
    capacity              = 12.5

* levee breach
[structure]
    type                  = dambreak
    id                    = breach01
"#
    .to_string()
}
