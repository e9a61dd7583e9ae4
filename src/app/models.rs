//! Data models for hydro file processing
//!
//! This module contains the geometry, feature, time-series and steerable value
//! types shared by the geometry, time-series and structure readers.

pub mod structures;

use crate::constants::{PLI_SEPARATOR_VALUE, REALTIME_MARKER};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use structures::{
    BreachGrowth, Gate, GateOpeningDirection, GeneralStructureFormula, LeveeBreach, Pump,
    PumpControlDirection, SimpleWeirFormula, Structure, StructureKind, TimeDependent,
    UserDefinedBreachSettings, VerheijVdKnaapSettings, Weir, WeirFormula,
};

// =============================================================================
// Geometry
// =============================================================================

/// A planar coordinate with an optional z value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coordinate {
    /// Create a coordinate without z
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Create a coordinate with z
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Whether this coordinate splits a polyline block into sub-features
    pub fn is_separator(&self) -> bool {
        self.x == PLI_SEPARATOR_VALUE || self.y == PLI_SEPARATOR_VALUE
    }

    /// Planar equality, z is ignored
    pub fn same_location(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A closed ring of coordinates, the first coordinate repeated at the end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    coordinates: Vec<Coordinate>,
}

impl LinearRing {
    /// Create a ring, appending the first coordinate when the input is not closed
    pub fn new(mut coordinates: Vec<Coordinate>) -> Result<Self> {
        if coordinates.len() < 3 {
            return Err(Error::invalid_argument(format!(
                "A polygon ring needs at least 3 coordinates, got {}",
                coordinates.len()
            )));
        }

        let first = coordinates[0];
        let closed = coordinates
            .last()
            .is_some_and(|last| last.same_location(&first));
        if !closed {
            coordinates.push(first);
        }

        Ok(Self { coordinates })
    }

    /// All coordinates including the closing one
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Coordinates without the closing one
    pub fn open_coordinates(&self) -> &[Coordinate] {
        &self.coordinates[..self.coordinates.len() - 1]
    }
}

/// Geometry of a feature read from or written to a geometry file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(LinearRing),
}

impl Geometry {
    /// One coordinate gives a point, more give a line string, none gives nothing
    pub fn from_coordinates(mut coordinates: Vec<Coordinate>) -> Option<Self> {
        match coordinates.len() {
            0 => None,
            1 => coordinates.pop().map(Geometry::Point),
            _ => Some(Geometry::LineString(coordinates)),
        }
    }

    /// Coordinates in file order
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(coordinate) => std::slice::from_ref(coordinate),
            Geometry::LineString(coordinates) => coordinates,
            Geometry::Polygon(ring) => ring.coordinates(),
        }
    }

    pub fn num_points(&self) -> usize {
        self.coordinates().len()
    }
}

// =============================================================================
// Features
// =============================================================================

/// A named geometry with per-point attribute columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature2D {
    /// Feature name as written in the file
    pub name: String,

    /// Point, line or polygon geometry
    pub geometry: Geometry,

    /// Numeric attribute columns, one value per point
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub numeric_attributes: BTreeMap<String, Vec<f64>>,

    /// String attribute columns, one value per point
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub string_attributes: BTreeMap<String, Vec<String>>,

    /// Optional location name per point, empty when the file has none
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub location_names: Vec<String>,
}

impl Feature2D {
    /// Create a feature without attributes
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            numeric_attributes: BTreeMap::new(),
            string_attributes: BTreeMap::new(),
            location_names: Vec::new(),
        }
    }

    /// Attach a numeric attribute column
    pub fn with_numeric_attribute(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.numeric_attributes.insert(name.into(), values);
        self
    }
}

// =============================================================================
// Time Series
// =============================================================================

/// Values at strictly increasing points in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    component_count: usize,
    times: Vec<NaiveDateTime>,
    values: Vec<Vec<f64>>,
}

impl TimeSeries {
    /// Create an empty series with a fixed number of value components per time
    pub fn new(component_count: usize) -> Self {
        Self {
            component_count,
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a row; times must increase and the component count must match
    pub fn push(&mut self, time: NaiveDateTime, values: Vec<f64>) -> Result<()> {
        if values.len() != self.component_count {
            return Err(Error::invalid_argument(format!(
                "Expected {} values at {}, got {}",
                self.component_count,
                time,
                values.len()
            )));
        }

        if let Some(last) = self.times.last() {
            if time <= *last {
                return Err(Error::invalid_argument(format!(
                    "Time {} does not follow previous time {}",
                    time, last
                )));
            }
        }

        self.times.push(time);
        self.values.push(values);
        Ok(())
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Rows as `(time, values)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDateTime, &[f64])> {
        self.times
            .iter()
            .zip(self.values.iter().map(|row| row.as_slice()))
    }

    /// All values of one component in time order
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|row| row.get(index).copied())
            .collect()
    }
}

// =============================================================================
// Steerable Values
// =============================================================================

/// A structure parameter that is constant or driven in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum Steerable {
    /// Fixed value
    Constant(f64),

    /// Values from a `.tim` file, path relative to the structures file
    TimeSeries(String),

    /// Value set at run time by a controller
    External,
}

impl Steerable {
    /// Parse a number, the realtime marker, or otherwise a time-series file name
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.eq_ignore_ascii_case(REALTIME_MARKER) {
            return Some(Steerable::External);
        }

        match crate::app::services::text_reader::parse_f64(trimmed) {
            Some(value) => Some(Steerable::Constant(value)),
            None => Some(Steerable::TimeSeries(trimmed.to_string())),
        }
    }

    /// Short mode name used in diagnostics
    pub fn mode_name(&self) -> &'static str {
        match self {
            Steerable::Constant(_) => "ConstantValue",
            Steerable::TimeSeries(_) => "TimeSeries",
            Steerable::External => "External",
        }
    }
}

impl fmt::Display for Steerable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Steerable::Constant(value) => {
                write!(f, "{}", crate::app::services::text_reader::format_f64(*value))
            }
            Steerable::TimeSeries(file_name) => write!(f, "{}", file_name),
            Steerable::External => write!(f, "{}", REALTIME_MARKER),
        }
    }
}
