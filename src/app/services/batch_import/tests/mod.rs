//! Test utilities and fixtures for batch import testing

use std::path::{Path, PathBuf};


/// Helper to write a file into a test directory
pub fn write_file(directory: &Path, name: &str, content: &str) -> PathBuf {
    let path = directory.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

pub fn create_pli_content() -> String {
    r#"weir01
    2    2
0.0 0.0
10.0 5.0
"#
    .to_string()
}

pub fn create_storage_content() -> String {
    r#"STDF id 'S1' nm 'Storage1' ml 5.0 il 0.0 stdf
STDF id 'S2' nm 'Storage2' ml 2.5 il 0.1 stdf
"#
    .to_string()
}

pub fn create_tim_content() -> String {
    "0 1.0\n60 2.0\n120 3.0\n".to_string()
}

/// A model directory with a nested sub-directory and one unrecognized file
pub fn create_model_directory(directory: &Path) {
    write_file(directory, "weir01.pli", &create_pli_content());
    write_file(directory, "UNPAVED.STO", &create_storage_content());
    write_file(directory, "notes.txt", "not a model file");
    write_file(directory, "boundaries/inflow.tim", &create_tim_content());
}
