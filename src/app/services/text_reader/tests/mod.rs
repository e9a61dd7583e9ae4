//! Test utilities for the text reader

use std::io::Write;
use tempfile::NamedTempFile;

mod numbers_tests;

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
