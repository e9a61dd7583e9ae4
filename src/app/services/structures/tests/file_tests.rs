//! Tests for structures file reading and writing

use super::*;
use crate::app::models::{
    BreachGrowth, Coordinate, GateOpeningDirection, Geometry, StructureKind, TimeDependent,
    WeirFormula,
};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::model_schema::{DataType, ModelSchema};
use crate::app::services::structures::file::StructuresFile;
use crate::{Error, ReaderConfig};
use chrono::Duration;
use tempfile::TempDir;

/// Structures file with its companion files in a fresh directory
fn create_model_directory() -> (TempDir, PathBuf) {
    let directory = TempDir::new().unwrap();
    write_file(directory.path(), "pump01_capacity.tim", &create_capacity_tim_content());
    write_file(directory.path(), "gate01.pli", &create_gate_pli_content());
    let path = write_file(directory.path(), "structures.ini", &create_structures_content());
    (directory, path)
}

fn default_config() -> ReaderConfig {
    ReaderConfig::default().with_reference_date(reference_date())
}

#[test]
fn test_read_structures() {
    let (_directory, path) = create_model_directory();
    let schema = bundled_schema();
    let config = default_config();

    let structures = StructuresFile::new(&schema, &config).read(&path).unwrap();

    let names: Vec<&str> = structures.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["pump01", "weir01", "gate01", "breach01"]);

    let StructureKind::Pump(pump) = &structures[0].kind else {
        panic!("expected a pump");
    };
    let capacity = pump.capacity.series().unwrap();
    assert_eq!(capacity.len(), 3);
    assert_eq!(capacity.times()[2], reference_date() + Duration::hours(2));
    assert_eq!(pump.start_level_suction_side, Some(1.5));

    assert_eq!(
        structures[1].geometry,
        Some(Geometry::Point(Coordinate::new(100.0, 200.0)))
    );
    let StructureKind::Weir(weir) = &structures[1].kind else {
        panic!("expected a weir");
    };
    assert_eq!(weir.crest_level, TimeDependent::Constant(2.5));
    assert_eq!(weir.crest_width, Some(12.0));
    assert!(matches!(
        &weir.formula,
        WeirFormula::Simple(formula) if !formula.use_velocity_height
    ));

    let StructureKind::LeveeBreach(breach) = &structures[3].kind else {
        panic!("expected a levee breach");
    };
    let BreachGrowth::VerheijVdKnaap2002(settings) = &breach.growth else {
        panic!("expected Verheij-vdKnaap growth");
    };
    assert_eq!(settings.start_time, reference_date() + Duration::hours(1));
    assert_eq!(settings.initial_breach_width, 10.0);
}

#[test]
fn test_legacy_property_keys() {
    let (_directory, path) = create_model_directory();
    let schema = bundled_schema();
    let config = default_config();

    let structures = StructuresFile::new(&schema, &config).read(&path).unwrap();

    let StructureKind::Gate(gate) = &structures[2].kind else {
        panic!("expected a gate");
    };
    // door_height, sill_level, gateheight and horizontal_opening_direction
    assert_eq!(gate.door_height, 4.0);
    assert_eq!(gate.sill_level, TimeDependent::Constant(-1.0));
    assert_eq!(gate.lower_edge_level, TimeDependent::Constant(3.0));
    assert_eq!(gate.horizontal_opening_direction, GateOpeningDirection::FromLeft);
}

#[test]
fn test_current_gate_height_key_is_not_renamed() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = gate
id = gate01
x = 0
y = 0
gateHeight = 5.0
"#,
    );
    let schema = bundled_schema();
    let config = default_config();

    let structures = StructuresFile::new(&schema, &config).read(&path).unwrap();
    let StructureKind::Gate(gate) = &structures[0].kind else {
        panic!("expected a gate");
    };
    assert_eq!(gate.door_height, 5.0);
    assert_eq!(gate.lower_edge_level, TimeDependent::Constant(0.0));
}

#[test]
fn test_skipped_sections_and_properties_are_warned() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[culvert]
id = c1

[structure]
id = no_type
x = 1
y = 1

[structure]
type = pump
id = pump01
x = 1
y = 2
capacity = 3.0
colour = red
"#,
    );
    let schema = bundled_schema();
    let config = default_config();
    let mut log = LogHandler::new("reading the structures file");

    let structures = StructuresFile::new(&schema, &config)
        .read_with_log(&path, &mut log)
        .unwrap();

    assert_eq!(structures.len(), 1);
    assert_eq!(
        log.warnings(),
        &[
            "Section [culvert] not supported for structures and is skipped (Line 5)".to_string(),
            "Obligated property 'type' expected but is missing; structure is skipped (Line 8)"
                .to_string(),
            "Property colour not supported for structures of type pump and is skipped (Line 19)"
                .to_string(),
        ]
    );
    assert!(log.errors().is_empty());

    let summary = log.warning_summary().unwrap();
    assert!(summary.starts_with("During reading the structures file, the following warnings were reported:"));
}

#[test]
fn test_invalid_definitions_are_reported_and_skipped() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = pump
id = nowhere
capacity = 1.0

[structure]
type = weir
id = weir01
x = 1
y = 2
crestLevel = 0.5
"#,
    );
    let schema = bundled_schema();
    let config = default_config();
    let mut log = LogHandler::new("reading");

    let structures = StructuresFile::new(&schema, &config)
        .read_with_log(&path, &mut log)
        .unwrap();

    assert_eq!(structures.len(), 1);
    assert_eq!(structures[0].name, "weir01");
    assert_eq!(log.errors().len(), 1);
    assert!(log.errors()[0].starts_with(
        "Failed to convert ini structure definition to actual structure (Line 5): Structure 'nowhere' has no geometry"
    ));
}

#[test]
fn test_recoverable_conversion_errors_drop_one_structure() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = weir
id = weir01
x = 1
y = 2

[structure]
type = pump
id = pump01
x = 1
y = 2
capacity = missing.tim

[structure]
type = weir
id = weir02
x = 1
y = 2
crestLevel = 0.5
"#,
    );
    let schema = bundled_schema();
    let config = default_config();
    let mut log = LogHandler::new("reading");

    let structures = StructuresFile::new(&schema, &config)
        .read_with_log(&path, &mut log)
        .unwrap();

    assert_eq!(structures.len(), 1);
    assert_eq!(structures[0].name, "weir02");
    assert_eq!(log.errors().len(), 2);
    assert!(log.errors()[0].contains("'weir01'"));
    assert!(log.errors()[0].contains("crestLevel"));
    assert!(log.errors()[1].contains("'pump01'"));
}

#[test]
fn test_unsupported_steerable_aborts_read() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = pump
id = pump01
x = 1
y = 2
capacity = REALTIME
"#,
    );
    let schema = bundled_schema();
    let config = default_config();

    let result = StructuresFile::new(&schema, &config).read(&path);
    assert!(matches!(result, Err(Error::UnsupportedSteerableMode { .. })));
}

#[test]
fn test_invalid_value_is_format_error() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = weir
id = weir01
x = abc
y = 2
"#,
    );
    let schema = bundled_schema();
    let config = default_config();

    let result = StructuresFile::new(&schema, &config).read(&path);
    match result {
        Err(Error::Format { line, message, .. }) => {
            assert_eq!(line, 8);
            assert_eq!(
                message,
                "An invalid value was encountered (expected a number) for property x"
            );
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_missing_capacity_takes_schema_default() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        r#"[General]
fileVersion = 2.00
fileType = structure

[structure]
type = pump
id = pump01
x = 1
y = 2
"#,
    );
    let schema = bundled_schema();
    let config = default_config();

    let structures = StructuresFile::new(&schema, &config).read(&path).unwrap();
    let StructureKind::Pump(pump) = &structures[0].kind else {
        panic!("expected a pump");
    };
    assert_eq!(pump.capacity, TimeDependent::Constant(1.0));
}

#[test]
fn test_general_header_required() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        "[structure]\ntype = pump\nid = pump01\nx = 1\ny = 2\ncapacity = 1.0\n",
    );
    let schema = bundled_schema();

    let config = default_config();
    let result = StructuresFile::new(&schema, &config).read(&path);
    assert!(matches!(result, Err(Error::Format { line: 1, .. })));

    let relaxed = default_config().without_general_header_requirement();
    let mut log = LogHandler::new("reading");
    let structures = StructuresFile::new(&schema, &relaxed)
        .read_with_log(&path, &mut log)
        .unwrap();
    assert_eq!(structures.len(), 1);
    assert_eq!(log.warnings().len(), 1);
    assert!(log.warnings()[0].starts_with("Missing [General] header"));
}

#[test]
fn test_general_structure_gate_level_defaults_from_schema() {
    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        "[General]\nfileVersion = 2.00\nfileType = structure\n\n[structure]\ntype = generalstructure\nid = gs01\nx = 0\ny = 0\ncrestLevel = 0.5\n",
    );
    let schema = bundled_schema();
    let config = default_config();

    let structures = StructuresFile::new(&schema, &config).read(&path).unwrap();
    let StructureKind::Weir(weir) = &structures[0].kind else {
        panic!("expected a weir");
    };
    let WeirFormula::GeneralStructure(formula) = &weir.formula else {
        panic!("expected a general structure formula");
    };
    assert_eq!(formula.gate_lower_edge_level, TimeDependent::Constant(11.0));
    assert_eq!(formula.gate_opening_width, TimeDependent::Constant(0.0));
}

#[test]
fn test_unparseable_schema_default_is_reported() {
    let mut schema = ModelSchema::new();
    for definition in bundled_schema().definitions() {
        let mut definition = definition.clone();
        if definition.structure_type == "pump" && definition.file_key == "capacity" {
            definition.data_type = DataType::Double;
            definition.default_value = "abc".to_string();
        }
        schema.add_definition(definition);
    }

    let directory = TempDir::new().unwrap();
    let path = write_file(
        directory.path(),
        "structures.ini",
        "[General]\nfileVersion = 2.00\nfileType = structure\n\n[structure]\ntype = pump\nid = pump01\nx = 0\ny = 0\n",
    );
    let config = default_config();
    let mut log = LogHandler::new("reading");

    let structures = StructuresFile::new(&schema, &config)
        .read_with_log(&path, &mut log)
        .unwrap();
    assert!(structures.is_empty());
    assert!(
        log.warnings().iter().any(|warning| warning
            .starts_with("Default value 'abc' of property capacity for structures of type pump is not applied")),
        "{:?}",
        log.warnings()
    );
}

#[test]
fn test_minor_version_compares_as_decimal() {
    let directory = TempDir::new().unwrap();
    let schema = bundled_schema();
    let config = default_config();
    let file = StructuresFile::new(&schema, &config);

    for version in ["2.1", "2.01", "2.001"] {
        let path = write_file(
            directory.path(),
            "versioned.ini",
            &format!("[General]\nfileVersion = {}\nfileType = structure\n", version),
        );
        assert!(
            matches!(file.read(&path), Err(Error::Format { line: 2, .. })),
            "{} should be newer than 2.00",
            version
        );
    }

    for version in ["2", "2.0", "2.00", "1.99", "1.5"] {
        let path = write_file(
            directory.path(),
            "versioned.ini",
            &format!("[General]\nfileVersion = {}\nfileType = structure\n", version),
        );
        assert!(file.read(&path).is_ok(), "{} should be supported", version);
    }

    let path = write_file(
        directory.path(),
        "versioned.ini",
        "[General]\nfileVersion = 2.x\nfileType = structure\n",
    );
    match file.read(&path) {
        Err(Error::Format { message, .. }) => assert_eq!(message, "Invalid file version '2.x'"),
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_general_header_version_and_type() {
    let directory = TempDir::new().unwrap();
    let schema = bundled_schema();
    let config = default_config();
    let file = StructuresFile::new(&schema, &config);

    let newer = write_file(
        directory.path(),
        "newer.ini",
        "[General]\nfileVersion = 3.00\nfileType = structure\n",
    );
    let error = file.read(&newer).unwrap_err();
    assert!(
        error
            .to_string()
            .starts_with("Unsupported file version 3.00, the highest supported version is 2.00 on line 2"),
        "{}",
        error
    );

    let older = write_file(
        directory.path(),
        "older.ini",
        "[General]\nfileVersion = 1.01\nfileType = Structure\n",
    );
    assert!(file.read(&older).unwrap().is_empty());

    let wrong_type = write_file(
        directory.path(),
        "wrong_type.ini",
        "[General]\nfileVersion = 2.00\nfileType = extForce\n",
    );
    assert!(matches!(
        file.read(&wrong_type),
        Err(Error::Format { line: 3, .. })
    ));
}

#[test]
fn test_write_and_read_back() {
    let (_directory, path) = create_model_directory();
    let schema = bundled_schema();
    let config = default_config();
    let file = StructuresFile::new(&schema, &config);
    let structures = file.read(&path).unwrap();

    let output = TempDir::new().unwrap();
    let output_path = output.path().join("structures.ini");
    file.write(&output_path, &structures).unwrap();

    // Line geometries and time series go to companion files
    assert!(output.path().join("pump01.pli").is_file());
    assert!(output.path().join("pump01_capacity.tim").is_file());
    assert!(output.path().join("gate01.pli").is_file());
    assert!(output.path().join("breach01.pli").is_file());

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("fileVersion"));
    assert!(content.contains("fromLeft"));
    assert!(!content.contains("from_left"));

    let read_back = file.read(&output_path).unwrap();
    assert_eq!(read_back, structures);
}

#[test]
fn test_write_definitions_keeps_values() {
    let (_directory, path) = create_model_directory();
    let schema = bundled_schema();
    let config = default_config();
    let file = StructuresFile::new(&schema, &config);
    let mut log = LogHandler::new("reading");
    let definitions = file.read_definitions(&path, &mut log).unwrap();

    let output = TempDir::new().unwrap();
    let output_path = output.path().join("structures.ini");
    file.write_definitions(&output_path, &definitions).unwrap();

    let mut log = LogHandler::new("reading");
    let read_back = file.read_definitions(&output_path, &mut log).unwrap();
    assert_eq!(read_back.len(), definitions.len());
    for (original, copy) in definitions.iter().zip(&read_back) {
        let original: Vec<(&str, &str)> = original
            .properties()
            .iter()
            .map(|p| (p.key(), p.raw.as_str()))
            .collect();
        let copy: Vec<(&str, &str)> = copy
            .properties()
            .iter()
            .map(|p| (p.key(), p.raw.as_str()))
            .collect();
        assert_eq!(original, copy);
    }
}

#[test]
fn test_reference_path_override() {
    let model = TempDir::new().unwrap();
    write_file(model.path(), "pump01_capacity.tim", &create_capacity_tim_content());
    write_file(model.path(), "gate01.pli", &create_gate_pli_content());

    let input = TempDir::new().unwrap();
    let path = write_file(input.path(), "structures.ini", &create_structures_content());

    let schema = bundled_schema();
    let config = default_config();
    let structures = StructuresFile::new(&schema, &config)
        .with_reference_path(model.path().join("model.mdu"))
        .read(&path)
        .unwrap();
    assert_eq!(structures.len(), 4);
}
