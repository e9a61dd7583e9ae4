//! Test utilities and fixtures for Sobek RR reader testing

use std::io::Write;
use tempfile::TempDir;

mod records_tests;

/// Unpaved storage definitions
pub fn create_storage_content() -> String {
    r#"STDF id 'S1' nm 'Storage1' ml 5.0 il 0.0 stdf
STDF id 'STOR1' nm 'STOR1' ml 10 il 0 stdf
STDF id 'PAV1' nm 'PAV1' ms 1 is 0 mr 0 0 ir 0 0 stdf"#
        .to_string()
}

/// Unpaved areas with one record lacking its id
pub fn create_unpaved_content() -> String {
    r#"UNPV id 'upGFE820' na 16 ga 99826 ar 99392 0 0 0 196 238 0 0 0 0 0 0 0 0 0 0 su 0 '' lv -0.18 co 3 ad '' rc 0 ed 'Drain1' sp 'GFE820' ic 'INF1' sd 'STOR1' ig 0  1.07 gl 2 bt 115 is 2566.2 ms 'Station1' aaf 1 unpv
UNPV na 1 ar 10 lv 0 unpv
UNPV id 'up2' na 2 ar 5 6 lv 1.5 co 1 sd 'STOR2' ms 'Station1' unpv"#
        .to_string()
}

/// Helper to write a file with a given name into a fresh temporary directory
pub fn create_named_file(file_name: &str, content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    (dir, path)
}
