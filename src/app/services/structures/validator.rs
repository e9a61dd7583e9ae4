//! Consistency checks on structure definitions
//!
//! Validation never fails: it returns the first problem found as a message,
//! or an empty string for a valid definition, so a batch of definitions can be
//! checked and the bad ones reported and skipped.

use super::structure2d::{Structure2D, Structure2DType};
use crate::constants::structure_keys as keys;

/// Two-pass validator: general checks, then type-specific checks
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureValidator;

impl StructureValidator {
    /// First validation error, empty when the definition is valid
    pub fn validate(structure: &Structure2D) -> String {
        Self::validate_general(structure)
            .or_else(|| Self::validate_type_specific(structure))
            .unwrap_or_default()
    }

    fn validate_general(structure: &Structure2D) -> Option<String> {
        let Some(name) = structure.name() else {
            return Some(format!(
                "Structure of type '{}' has no name (property '{}')",
                structure.declared_type,
                keys::ID
            ));
        };

        if structure.structure_type == Structure2DType::InvalidType {
            return Some(format!(
                "Structure '{}' has unsupported type '{}'",
                name, structure.declared_type
            ));
        }

        if !structure
            .declared_type
            .trim()
            .eq_ignore_ascii_case(structure.structure_type.type_name())
        {
            return Some(format!(
                "Structure '{}' declares type '{}' but is a {}",
                name,
                structure.declared_type,
                structure.structure_type.type_name()
            ));
        }

        if let Some(type_property) = structure.get_property(keys::TYPE) {
            if !type_property
                .raw
                .eq_ignore_ascii_case(structure.structure_type.type_name())
            {
                return Some(format!(
                    "Structure '{}' has type property '{}' which does not match type '{}'",
                    name,
                    type_property.raw,
                    structure.structure_type.type_name()
                ));
            }
        }

        Self::validate_geometry(structure, name)
    }

    fn validate_geometry(structure: &Structure2D, name: &str) -> Option<String> {
        let has_coordinate_arrays =
            structure.has_value(keys::X_COORDINATES) || structure.has_value(keys::Y_COORDINATES);
        let has_point = structure.has_value(keys::X) || structure.has_value(keys::Y);
        let has_coordinates = has_coordinate_arrays || has_point;
        let has_polyline_file = structure.has_value(keys::POLYLINE_FILE);

        if has_coordinates && has_polyline_file {
            return Some(format!(
                "Structure '{}' has both coordinates and a polyline file; only one may be given",
                name
            ));
        }
        if !has_coordinates && !has_polyline_file {
            return Some(format!(
                "Structure '{}' has no geometry; give either coordinates or a polyline file",
                name
            ));
        }

        if has_coordinate_arrays {
            let x_count = value_count(structure, keys::X_COORDINATES);
            let y_count = value_count(structure, keys::Y_COORDINATES);
            if x_count != y_count {
                return Some(format!(
                    "Structure '{}' has {} x-coordinates but {} y-coordinates",
                    name, x_count, y_count
                ));
            }

            if let Some(expected) = structure
                .get_property(keys::NUM_COORDINATES)
                .and_then(|property| property.raw.parse::<usize>().ok())
            {
                if expected != x_count {
                    return Some(format!(
                        "Structure '{}' declares {} coordinates but has {}",
                        name, expected, x_count
                    ));
                }
            }
        } else if has_point && !(structure.has_value(keys::X) && structure.has_value(keys::Y)) {
            return Some(format!(
                "Structure '{}' needs both '{}' and '{}' for a point location",
                name,
                keys::X,
                keys::Y
            ));
        }

        None
    }

    fn validate_type_specific(structure: &Structure2D) -> Option<String> {
        let name = structure.name().unwrap_or_default();
        match structure.structure_type {
            Structure2DType::Pump => Self::validate_pump(structure, name),
            Structure2DType::Gate => require(structure, name, keys::GATE_HEIGHT),
            Structure2DType::LeveeBreach => require(structure, name, keys::START_LOCATION_X)
                .or_else(|| require(structure, name, keys::START_LOCATION_Y)),
            Structure2DType::Weir
            | Structure2DType::GeneralStructure
            | Structure2DType::InvalidType => None,
        }
    }

    fn validate_pump(structure: &Structure2D, name: &str) -> Option<String> {
        let levels = structure
            .get_property(keys::NUM_REDUCTION_LEVELS)
            .and_then(|property| property.raw.parse::<i64>().ok())
            .unwrap_or(0);

        match levels {
            0 => None,
            1 => require(structure, name, keys::REDUCTION_FACTOR),
            levels if levels > 1 => {
                let expected = levels as usize;
                [keys::HEAD, keys::REDUCTION_FACTOR]
                    .into_iter()
                    .find_map(|key| {
                        let count = value_count(structure, key);
                        (count != expected).then(|| {
                            format!(
                                "Pump '{}' has {} reduction levels but {} values for '{}'",
                                name, expected, count, key
                            )
                        })
                    })
            }
            levels => Some(format!(
                "Pump '{}' has a negative number of reduction levels ({})",
                name, levels
            )),
        }
    }
}

fn require(structure: &Structure2D, name: &str, key: &str) -> Option<String> {
    (!structure.has_value(key)).then(|| {
        format!(
            "Structure '{}' of type '{}' requires property '{}'",
            name,
            structure.structure_type.type_name(),
            key
        )
    })
}

/// Number of whitespace separated values of a property, 0 when absent
fn value_count(structure: &Structure2D, key: &str) -> usize {
    structure
        .get_property(key)
        .map(|property| property.raw.split_whitespace().count())
        .unwrap_or(0)
}
