//! Tests for `.xyz` and `.xyn` point files

use super::*;
use crate::Error;
use crate::app::models::Coordinate;
use crate::app::services::geometry_files::{
    NamedPoint, PointValue, parse_xyn, parse_xyz, read_xyn, read_xyz, write_xyn, write_xyz,
};

#[test]
fn test_parse_xyz() {
    let points = parse_xyz("* samples\n1.0 2.0 -3.5\n\n4 5 6d-1\n", "bed.xyz").unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].coordinate, Coordinate::new(1.0, 2.0));
    assert_eq!(points[0].value, -3.5);
    assert_eq!(points[1].value, 0.6);
}

#[test]
fn test_xyz_row_without_value() {
    let result = parse_xyz("1 2 3\n4 5\n", "bed.xyz");
    assert!(matches!(result, Err(Error::Format { line: 2, .. })));
}

#[test]
fn test_xyz_file_round_trip() {
    let points = vec![
        PointValue {
            coordinate: Coordinate::new(100.5, -20.25),
            value: 1.75,
        },
        PointValue {
            coordinate: Coordinate::new(0.0, 0.0),
            value: -4.0,
        },
    ];

    let temp_file = create_temp_file("");
    write_xyz(temp_file.path(), &points).unwrap();

    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(content.lines().next().unwrap().len(), 72);
    assert_eq!(read_xyz(temp_file.path()).unwrap(), points);
}

#[test]
fn test_parse_xyn_with_quoted_names() {
    let points = parse_xyn("10 20 'obs point 1'\n30 40 obs2\n", "obs.xyn").unwrap();
    assert_eq!(points[0].name, "obs point 1");
    assert_eq!(points[0].coordinate, Coordinate::new(10.0, 20.0));
    assert_eq!(points[1].name, "obs2");
}

#[test]
fn test_xyn_file_round_trip() {
    let points = vec![NamedPoint {
        coordinate: Coordinate::new(1.5, 2.5),
        name: "station with spaces".to_string(),
    }];

    let temp_file = create_temp_file("");
    write_xyn(temp_file.path(), &points).unwrap();
    assert_eq!(read_xyn(temp_file.path()).unwrap(), points);
}

#[test]
fn test_xyn_invalid_coordinate() {
    let result = parse_xyn("x 20 'a'\n", "obs.xyn");
    match result {
        Err(Error::Format { line, message, .. }) => {
            assert_eq!(line, 1);
            assert!(message.contains("Invalid x coordinate"));
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}
