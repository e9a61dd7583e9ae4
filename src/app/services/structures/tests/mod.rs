//! Test utilities and fixtures for structure testing

use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

use super::structure2d::{Property, Structure2D};
use crate::app::services::model_schema::{ModelPropertyDefinition, ModelSchema, load_schema};

mod file_tests;

/// Schema shipped with the crate
pub fn bundled_schema() -> ModelSchema {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/structure-properties.csv");
    load_schema(&path).unwrap()
}

pub fn reference_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Helper to write a file into a test directory
pub fn write_file(directory: &Path, name: &str, content: &str) -> PathBuf {
    let path = directory.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Build a definition in memory; keys unknown to the schema are kept as text
pub fn definition(schema: &ModelSchema, structure_type: &str, properties: &[(&str, &str)]) -> Structure2D {
    let mut structure = Structure2D::new(structure_type).with_line(1);
    for (index, (key, value)) in properties.iter().enumerate() {
        let property_definition = schema
            .structure_definition(structure_type, key)
            .cloned()
            .unwrap_or_else(|| ModelPropertyDefinition::text(*key, structure_type));
        structure.add_property(Property::new(property_definition, value, index + 2).unwrap());
    }
    structure
}

/// One structure of each kind; the pump capacity comes from `pump01_capacity.tim`
pub fn create_structures_content() -> String {
    r#"[General]
    fileVersion           = 2.00
    fileType              = structure

[structure]
    type                  = pump                # Type of structure
    id                    = pump01
    xCoordinates          = 10.0 20.0
    yCoordinates          = 5.0 5.0
    capacity              = pump01_capacity.tim
    startLevelSuctionSide = 1.5
    stopLevelSuctionSide  = 0.5

[structure]
    type                  = weir
    id                    = weir01
    x                     = 100.0
    y                     = 200.0
    crestLevel            = 2.5
    crestWidth            = 12
    useVelocityHeight     = false

[structure]
    type                  = gate
    id                    = gate01
    polylinefile          = gate01.pli
    door_height           = 4.0
    sill_level            = -1.0
    gateheight            = 3.0
    horizontal_opening_direction = from_left

[structure]
    type                  = dambreak
    id                    = breach01
    xCoordinates          = 0.0 50.0
    yCoordinates          = 0.0 0.0
    startLocationX        = 25.0
    startLocationY        = 0.0
    algorithm             = 2
    t0                    = 3600
    crestLevelIni         = 4.0
    crestLevelMin         = 1.0
    breachWidthIni        = 10.0
"#
    .to_string()
}

pub fn create_capacity_tim_content() -> String {
    r#"* capacity of pump01
0      1.5
60     2.0
120    0.0
"#
    .to_string()
}

pub fn create_gate_pli_content() -> String {
    r#"gate01
    2    2
30.0 40.0
30.0 60.0
"#
    .to_string()
}
