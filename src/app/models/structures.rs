//! Typed hydraulic structures built from structure definitions
//!
//! A [`Structure`] carries a name, an optional geometry and exactly one
//! [`StructureKind`]. Every consumer matches the kind exhaustively, so adding a
//! variant is a compile error wherever it is not yet handled.

use super::{Coordinate, Geometry, TimeSeries};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A structure with its location and type-specific data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    pub kind: StructureKind,
}

impl Structure {
    /// Type name as written in structure files
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            StructureKind::Pump(_) => "pump",
            StructureKind::Weir(weir) => match weir.formula {
                WeirFormula::Simple(_) => "weir",
                WeirFormula::GeneralStructure(_) => "generalstructure",
            },
            StructureKind::Gate(_) => "gate",
            StructureKind::LeveeBreach(_) => "dambreak",
        }
    }
}

/// Tagged union over the supported structure kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "structure", rename_all = "snake_case")]
pub enum StructureKind {
    Pump(Pump),
    Weir(Weir),
    Gate(Gate),
    LeveeBreach(LeveeBreach),
}

/// A parameter value that is constant or given by a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum TimeDependent {
    Constant(f64),
    Series(TimeSeries),
}

impl TimeDependent {
    /// Constant value, if any
    pub fn constant(&self) -> Option<f64> {
        match self {
            TimeDependent::Constant(value) => Some(*value),
            TimeDependent::Series(_) => None,
        }
    }

    /// Time series, if any
    pub fn series(&self) -> Option<&TimeSeries> {
        match self {
            TimeDependent::Constant(_) => None,
            TimeDependent::Series(series) => Some(series),
        }
    }
}

// =============================================================================
// Pump
// =============================================================================

/// Side of the pump whose water level switches it on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpControlDirection {
    SuctionSide,
    DeliverySide,
    SuctionAndDeliverySide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pump {
    /// Pump capacity in m3/s
    pub capacity: TimeDependent,

    pub control_direction: PumpControlDirection,

    pub start_level_suction_side: Option<f64>,
    pub stop_level_suction_side: Option<f64>,
    pub start_level_delivery_side: Option<f64>,
    pub stop_level_delivery_side: Option<f64>,

    /// Capacity reduction factor per head difference, ordered by head
    pub reduction_table: Vec<(f64, f64)>,
}

// =============================================================================
// Weir
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weir {
    pub crest_level: TimeDependent,

    /// Crest width, none when the structure spans its geometry
    pub crest_width: Option<f64>,

    pub formula: WeirFormula,
}

/// Discharge formula of a weir
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum WeirFormula {
    Simple(SimpleWeirFormula),
    GeneralStructure(GeneralStructureFormula),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleWeirFormula {
    pub correction_coefficient: f64,
    pub use_velocity_height: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStructureFormula {
    pub upstream1_width: Option<f64>,
    pub upstream1_level: f64,
    pub upstream2_width: Option<f64>,
    pub upstream2_level: f64,
    pub downstream1_width: Option<f64>,
    pub downstream1_level: f64,
    pub downstream2_width: Option<f64>,
    pub downstream2_level: f64,

    pub positive_free_gate_flow: f64,
    pub positive_drowned_gate_flow: f64,
    pub positive_free_weir_flow: f64,
    pub positive_drowned_weir_flow: f64,
    pub positive_contraction_coefficient: f64,
    pub negative_free_gate_flow: f64,
    pub negative_drowned_gate_flow: f64,
    pub negative_free_weir_flow: f64,
    pub negative_drowned_weir_flow: f64,
    pub negative_contraction_coefficient: f64,

    pub extra_resistance: f64,
    pub gate_height: f64,
    pub gate_lower_edge_level: TimeDependent,
    pub gate_opening_width: TimeDependent,
    pub gate_opening_direction: GateOpeningDirection,
}

// =============================================================================
// Gate
// =============================================================================

/// Direction in which gate doors open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOpeningDirection {
    Symmetric,
    FromLeft,
    FromRight,
}

impl GateOpeningDirection {
    /// Parse the current or the legacy spelling
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "symmetric" => Ok(Self::Symmetric),
            "fromleft" | "from_left" => Ok(Self::FromLeft),
            "fromright" | "from_right" => Ok(Self::FromRight),
            other => Err(Error::invalid_argument(format!(
                "Unknown gate opening direction '{}', expected symmetric, fromLeft or fromRight",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::FromLeft => "fromLeft",
            Self::FromRight => "fromRight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Height of the gate doors
    pub door_height: f64,
    pub sill_width: f64,
    pub sill_level: TimeDependent,
    pub lower_edge_level: TimeDependent,
    pub opening_width: TimeDependent,
    pub horizontal_opening_direction: GateOpeningDirection,
}

// =============================================================================
// Levee Breach
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeveeBreach {
    pub breach_location: Coordinate,

    /// Upstream and downstream water level locations, set only when both are given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_level_locations: Option<(Coordinate, Coordinate)>,

    /// Whether breach growth is computed
    pub growth_active: bool,

    pub growth: BreachGrowth,
}

/// Breach growth formula and its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum BreachGrowth {
    None,
    VerheijVdKnaap2002(VerheijVdKnaapSettings),
    UserDefined(UserDefinedBreachSettings),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerheijVdKnaapSettings {
    pub start_time: NaiveDateTime,
    pub initial_crest_level: f64,
    pub minimum_crest_level: f64,
    pub initial_breach_width: f64,
    pub factor_f1: f64,
    pub factor_f2: f64,
    pub critical_flow_velocity: f64,
    /// Seconds until the minimum crest level is reached
    pub period_to_reach_minimum_crest_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedBreachSettings {
    pub start_time: NaiveDateTime,
    /// Breach level and width over time, none when the table file is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TimeSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opening_direction_spellings() {
        assert_eq!(
            GateOpeningDirection::parse("symmetric").unwrap(),
            GateOpeningDirection::Symmetric
        );
        assert_eq!(
            GateOpeningDirection::parse("fromLeft").unwrap(),
            GateOpeningDirection::FromLeft
        );
        assert_eq!(
            GateOpeningDirection::parse("from_right").unwrap(),
            GateOpeningDirection::FromRight
        );
        assert!(matches!(
            GateOpeningDirection::parse("sideways"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_type_name_follows_weir_formula() {
        let weir = Structure {
            name: "w1".to_string(),
            geometry: None,
            kind: StructureKind::Weir(Weir {
                crest_level: TimeDependent::Constant(1.0),
                crest_width: None,
                formula: WeirFormula::Simple(SimpleWeirFormula {
                    correction_coefficient: 1.0,
                    use_velocity_height: true,
                }),
            }),
        };
        assert_eq!(weir.type_name(), "weir");
    }
}
