//! Conversion of structure definitions into typed structures
//!
//! The factory is a pure function of its input: one [`Structure2D`] plus the
//! path that companion files are relative to and the model reference date.
//! Companion `.tim` and `.pli` files are read while building.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::structure2d::{Property, Structure2D, Structure2DType};
use crate::app::models::{
    BreachGrowth, Coordinate, Gate, GateOpeningDirection, GeneralStructureFormula, Geometry,
    LeveeBreach, Pump, PumpControlDirection, SimpleWeirFormula, Steerable, Structure,
    StructureKind, TimeDependent, TimeSeries, UserDefinedBreachSettings, VerheijVdKnaapSettings,
    Weir, WeirFormula,
};
use crate::app::services::geometry_files::PliFile;
use crate::app::services::log_handler::LogHandler;
use crate::app::services::model_schema::PropertyValue;
use crate::app::services::progress::no_progress;
use crate::app::services::text_reader::{offset_date, parse_f64, parse_i32};
use crate::app::services::timeseries_files::TimFile;
use crate::config::GeometryConfig;
use crate::constants::{
    DEFAULT_CORRECTION_COEFFICIENT, DEFAULT_FLOW_COEFFICIENT, breach_algorithms, breach_defaults,
    structure_keys as keys,
};
use crate::{Error, Result};

/// Builds typed structures from structure definitions
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureFactory;

impl StructureFactory {
    /// Build the structure of any supported type
    ///
    /// `reference_path` is the file that companion files are relative to,
    /// usually the structures file itself.
    pub fn create_structure(
        structure: &Structure2D,
        reference_path: &Path,
        reference_date: NaiveDateTime,
    ) -> Result<Structure> {
        let builder = Builder::new(structure, reference_path, reference_date)?;
        let kind = match structure.structure_type {
            Structure2DType::Pump => StructureKind::Pump(builder.pump()?),
            Structure2DType::Weir => StructureKind::Weir(builder.simple_weir()?),
            Structure2DType::GeneralStructure => {
                StructureKind::Weir(builder.general_structure_weir()?)
            }
            Structure2DType::Gate => StructureKind::Gate(builder.gate()?),
            Structure2DType::LeveeBreach => StructureKind::LeveeBreach(builder.levee_breach()?),
            Structure2DType::InvalidType => {
                return Err(Error::invalid_structure_type(
                    builder.name,
                    &structure.declared_type,
                ));
            }
        };

        debug!(
            "Created {} '{}' from definition on line {}",
            structure.structure_type.type_name(),
            builder.name,
            structure.line
        );

        Ok(Structure {
            geometry: builder.geometry()?,
            name: builder.name,
            kind,
        })
    }

    pub fn create_pump(
        structure: &Structure2D,
        reference_path: &Path,
        reference_date: NaiveDateTime,
    ) -> Result<Structure> {
        Self::check_type(structure, &[Structure2DType::Pump])?;
        Self::create_structure(structure, reference_path, reference_date)
    }

    /// Build a simple weir or a general structure weir
    pub fn create_weir(
        structure: &Structure2D,
        reference_path: &Path,
        reference_date: NaiveDateTime,
    ) -> Result<Structure> {
        Self::check_type(
            structure,
            &[Structure2DType::Weir, Structure2DType::GeneralStructure],
        )?;
        Self::create_structure(structure, reference_path, reference_date)
    }

    pub fn create_gate(
        structure: &Structure2D,
        reference_path: &Path,
        reference_date: NaiveDateTime,
    ) -> Result<Structure> {
        Self::check_type(structure, &[Structure2DType::Gate])?;
        Self::create_structure(structure, reference_path, reference_date)
    }

    pub fn create_levee_breach(
        structure: &Structure2D,
        reference_path: &Path,
        reference_date: NaiveDateTime,
    ) -> Result<Structure> {
        Self::check_type(structure, &[Structure2DType::LeveeBreach])?;
        Self::create_structure(structure, reference_path, reference_date)
    }

    fn check_type(structure: &Structure2D, accepted: &[Structure2DType]) -> Result<()> {
        if accepted.contains(&structure.structure_type) {
            Ok(())
        } else {
            Err(Error::invalid_structure_type(
                structure.name().unwrap_or_default(),
                &structure.declared_type,
            ))
        }
    }
}

/// Property access for one structure definition
struct Builder<'a> {
    structure: &'a Structure2D,
    reference_path: &'a Path,
    reference_date: NaiveDateTime,
    name: String,
}

impl<'a> Builder<'a> {
    fn new(
        structure: &'a Structure2D,
        reference_path: &'a Path,
        reference_date: NaiveDateTime,
    ) -> Result<Self> {
        let name = structure.name().map(str::to_string).ok_or_else(|| {
            Error::missing_property(
                &structure.declared_type,
                keys::ID,
                reference_path.display().to_string(),
            )
        })?;

        Ok(Self {
            structure,
            reference_path,
            reference_date,
            name,
        })
    }

    fn file(&self) -> String {
        self.reference_path.display().to_string()
    }

    /// Companion file path relative to the reference file
    fn resolve(&self, file_name: &str) -> PathBuf {
        self.reference_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name)
    }

    /// Property with a non-empty value
    fn property(&self, key: &str) -> Option<&'a Property> {
        self.structure
            .get_property(key)
            .filter(|property| !property.is_empty())
    }

    fn invalid_value(&self, property: &Property, expected: &str) -> Error {
        Error::format(
            self.file(),
            property.line,
            format!(
                "Invalid value '{}' for property {} of structure '{}', expected {}",
                property.raw,
                property.key(),
                self.name,
                expected
            ),
        )
    }

    fn missing(&self, key: &str) -> Error {
        Error::missing_property(&self.name, key, self.file())
    }

    fn warn_default(&self, key: &str, default: impl std::fmt::Display) {
        warn!(
            "Structure '{}' has no value for '{}'; using default {}",
            self.name, key, default
        );
    }

    // =========================================================================
    // Typed property access
    // =========================================================================

    fn optional_f64(&self, key: &str) -> Result<Option<f64>> {
        let Some(property) = self.property(key) else {
            return Ok(None);
        };

        property
            .value
            .as_ref()
            .and_then(PropertyValue::as_f64)
            .or_else(|| parse_f64(&property.raw))
            .map(Some)
            .ok_or_else(|| self.invalid_value(property, "a number"))
    }

    fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        Ok(match self.optional_f64(key)? {
            Some(value) => value,
            None => {
                self.warn_default(key, default);
                default
            }
        })
    }

    fn optional_i32(&self, key: &str) -> Result<Option<i32>> {
        let Some(property) = self.property(key) else {
            return Ok(None);
        };

        property
            .value
            .as_ref()
            .and_then(PropertyValue::as_i32)
            .or_else(|| parse_i32(&property.raw))
            .map(Some)
            .ok_or_else(|| self.invalid_value(property, "a whole number"))
    }

    fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        let Some(property) = self.property(key) else {
            self.warn_default(key, default);
            return Ok(default);
        };

        if let Some(flag) = property.value.as_ref().and_then(PropertyValue::as_bool) {
            return Ok(flag);
        }
        match property.raw.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(self.invalid_value(property, "a '1' or '0'")),
        }
    }

    /// Numbers of an array property, empty when absent
    fn doubles(&self, key: &str) -> Result<Vec<f64>> {
        let Some(property) = self.property(key) else {
            return Ok(Vec::new());
        };

        if let Some(values) = property.value.as_ref().and_then(PropertyValue::as_doubles) {
            return Ok(values.to_vec());
        }
        property
            .raw
            .split_whitespace()
            .map(|item| {
                parse_f64(item)
                    .ok_or_else(|| self.invalid_value(property, "a series of space separated numbers"))
            })
            .collect()
    }

    fn steerable(&self, key: &str) -> Result<Option<TimeDependent>> {
        let Some(property) = self.property(key) else {
            return Ok(None);
        };

        let steerable = match &property.value {
            Some(PropertyValue::Steerable(steerable)) => steerable.clone(),
            _ => Steerable::parse(&property.raw).ok_or_else(|| {
                self.invalid_value(property, "a number or a filepath to a time series")
            })?,
        };

        match &steerable {
            Steerable::Constant(value) => Ok(Some(TimeDependent::Constant(*value))),
            Steerable::TimeSeries(file_name) => {
                let series = self.read_time_series(file_name)?;
                Ok(Some(TimeDependent::Series(series)))
            }
            Steerable::External => Err(Error::unsupported_steerable_mode(
                format!("{} of structure '{}'", key, self.name),
                steerable.mode_name(),
            )),
        }
    }

    fn steerable_or(&self, key: &str, default: f64) -> Result<TimeDependent> {
        Ok(match self.steerable(key)? {
            Some(value) => value,
            None => {
                self.warn_default(key, default);
                TimeDependent::Constant(default)
            }
        })
    }

    /// Steerable that falls back to the schema default, and fails without one
    fn required_steerable(&self, key: &str) -> Result<TimeDependent> {
        if let Some(value) = self.steerable(key)? {
            return Ok(value);
        }

        let default = self
            .structure
            .get_property(key)
            .and_then(|property| property.definition.default_typed_value())
            .and_then(|value| value.as_f64());
        match default {
            Some(value) => {
                self.warn_default(key, value);
                Ok(TimeDependent::Constant(value))
            }
            None => Err(self.missing(key)),
        }
    }

    fn opening_direction(&self) -> Result<GateOpeningDirection> {
        match self.property(keys::GATE_OPENING_HORIZONTAL_DIRECTION) {
            Some(property) => {
                let text = property
                    .value
                    .as_ref()
                    .and_then(PropertyValue::as_str)
                    .unwrap_or(property.raw.as_str());
                GateOpeningDirection::parse(text)
            }
            None => Ok(GateOpeningDirection::Symmetric),
        }
    }

    fn read_time_series(&self, file_name: &str) -> Result<TimeSeries> {
        let path = self.resolve(file_name);
        debug!(
            "Reading time series of structure '{}' from {}",
            self.name,
            path.display()
        );
        TimFile::new(self.reference_date).read(&path)
    }

    // =========================================================================
    // Common data
    // =========================================================================

    fn geometry(&self) -> Result<Option<Geometry>> {
        if self.property(keys::X_COORDINATES).is_some() || self.property(keys::Y_COORDINATES).is_some()
        {
            let xs = self.doubles(keys::X_COORDINATES)?;
            let ys = self.doubles(keys::Y_COORDINATES)?;
            if xs.len() != ys.len() {
                let line = self
                    .structure
                    .get_property(keys::X_COORDINATES)
                    .map(|property| property.line)
                    .unwrap_or(self.structure.line);
                return Err(Error::format(
                    self.file(),
                    line,
                    format!(
                        "Structure '{}' has {} x-coordinates but {} y-coordinates",
                        self.name,
                        xs.len(),
                        ys.len()
                    ),
                ));
            }

            let coordinates = xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| Coordinate::new(x, y))
                .collect();
            return Ok(Geometry::from_coordinates(coordinates));
        }

        if let (Some(x), Some(y)) = (self.optional_f64(keys::X)?, self.optional_f64(keys::Y)?) {
            return Ok(Some(Geometry::Point(Coordinate::new(x, y))));
        }

        if let Some(property) = self.property(keys::POLYLINE_FILE) {
            let path = self.resolve(&property.raw);
            let mut log = LogHandler::new(format!(
                "reading the polyline file of structure '{}'",
                self.name
            ));
            let features = PliFile::for_path(&path, &GeometryConfig::default()).read(
                &path,
                &mut log,
                &mut no_progress,
            )?;
            log.log_report();

            return features
                .into_iter()
                .next()
                .map(|feature| Some(feature.geometry))
                .ok_or_else(|| {
                    Error::format(
                        path.display().to_string(),
                        1,
                        "Polyline file holds no features",
                    )
                });
        }

        Ok(None)
    }

    // =========================================================================
    // Builders
    // =========================================================================

    fn pump(&self) -> Result<Pump> {
        let start_level_suction_side = self.optional_f64(keys::START_LEVEL_SUCTION_SIDE)?;
        let stop_level_suction_side = self.optional_f64(keys::STOP_LEVEL_SUCTION_SIDE)?;
        let start_level_delivery_side = self.optional_f64(keys::START_LEVEL_DELIVERY_SIDE)?;
        let stop_level_delivery_side = self.optional_f64(keys::STOP_LEVEL_DELIVERY_SIDE)?;

        let has_suction = start_level_suction_side.is_some() || stop_level_suction_side.is_some();
        let has_delivery =
            start_level_delivery_side.is_some() || stop_level_delivery_side.is_some();
        let control_direction = match (has_suction, has_delivery) {
            (true, true) => PumpControlDirection::SuctionAndDeliverySide,
            (false, true) => PumpControlDirection::DeliverySide,
            (_, false) => PumpControlDirection::SuctionSide,
        };

        Ok(Pump {
            capacity: self.required_steerable(keys::CAPACITY)?,
            control_direction,
            start_level_suction_side,
            stop_level_suction_side,
            start_level_delivery_side,
            stop_level_delivery_side,
            reduction_table: self.reduction_table()?,
        })
    }

    /// Head to reduction factor pairs
    fn reduction_table(&self) -> Result<Vec<(f64, f64)>> {
        let levels = self.optional_i32(keys::NUM_REDUCTION_LEVELS)?.unwrap_or(0);
        match levels {
            0 => Ok(vec![(0.0, 1.0)]),
            1 => {
                let factor = match self.doubles(keys::REDUCTION_FACTOR)?.first() {
                    Some(factor) => *factor,
                    None => {
                        self.warn_default(keys::REDUCTION_FACTOR, 1.0);
                        1.0
                    }
                };
                Ok(vec![(0.0, factor)])
            }
            levels if levels > 1 => {
                let heads = self.doubles(keys::HEAD)?;
                let factors = self.doubles(keys::REDUCTION_FACTOR)?;
                let expected = levels as usize;
                if heads.len() != expected || factors.len() != expected {
                    let line = self
                        .structure
                        .get_property(keys::NUM_REDUCTION_LEVELS)
                        .map(|property| property.line)
                        .unwrap_or(self.structure.line);
                    return Err(Error::format(
                        self.file(),
                        line,
                        format!(
                            "Pump '{}' has {} reduction levels but {} heads and {} reduction factors",
                            self.name,
                            expected,
                            heads.len(),
                            factors.len()
                        ),
                    ));
                }
                Ok(heads.into_iter().zip(factors).collect())
            }
            levels => Err(Error::invalid_argument(format!(
                "Pump '{}' has a negative number of reduction levels ({})",
                self.name, levels
            ))),
        }
    }

    fn simple_weir(&self) -> Result<Weir> {
        Ok(Weir {
            crest_level: self.required_steerable(keys::CREST_LEVEL)?,
            crest_width: self.optional_f64(keys::CREST_WIDTH)?,
            formula: WeirFormula::Simple(SimpleWeirFormula {
                correction_coefficient: self
                    .f64_or(keys::CORRECTION_COEFFICIENT, DEFAULT_CORRECTION_COEFFICIENT)?,
                use_velocity_height: self.bool_or(keys::USE_VELOCITY_HEIGHT, true)?,
            }),
        })
    }

    fn general_structure_weir(&self) -> Result<Weir> {
        let coefficient = |key: &str| self.f64_or(key, DEFAULT_FLOW_COEFFICIENT);
        let formula = GeneralStructureFormula {
            upstream1_width: self.optional_f64(keys::UPSTREAM1_WIDTH)?,
            upstream1_level: self.f64_or(keys::UPSTREAM1_LEVEL, 0.0)?,
            upstream2_width: self.optional_f64(keys::UPSTREAM2_WIDTH)?,
            upstream2_level: self.f64_or(keys::UPSTREAM2_LEVEL, 0.0)?,
            downstream1_width: self.optional_f64(keys::DOWNSTREAM1_WIDTH)?,
            downstream1_level: self.f64_or(keys::DOWNSTREAM1_LEVEL, 0.0)?,
            downstream2_width: self.optional_f64(keys::DOWNSTREAM2_WIDTH)?,
            downstream2_level: self.f64_or(keys::DOWNSTREAM2_LEVEL, 0.0)?,

            positive_free_gate_flow: coefficient(keys::POS_FREE_GATE_FLOW_COEFF)?,
            positive_drowned_gate_flow: coefficient(keys::POS_DROWN_GATE_FLOW_COEFF)?,
            positive_free_weir_flow: coefficient(keys::POS_FREE_WEIR_FLOW_COEFF)?,
            positive_drowned_weir_flow: coefficient(keys::POS_DROWN_WEIR_FLOW_COEFF)?,
            positive_contraction_coefficient: coefficient(keys::POS_CONTR_COEF_FREE_GATE)?,
            negative_free_gate_flow: coefficient(keys::NEG_FREE_GATE_FLOW_COEFF)?,
            negative_drowned_gate_flow: coefficient(keys::NEG_DROWN_GATE_FLOW_COEFF)?,
            negative_free_weir_flow: coefficient(keys::NEG_FREE_WEIR_FLOW_COEFF)?,
            negative_drowned_weir_flow: coefficient(keys::NEG_DROWN_WEIR_FLOW_COEFF)?,
            negative_contraction_coefficient: coefficient(keys::NEG_CONTR_COEF_FREE_GATE)?,

            extra_resistance: self.f64_or(keys::EXTRA_RESISTANCE, 0.0)?,
            gate_height: self.f64_or(keys::GATE_HEIGHT, 0.0)?,
            gate_lower_edge_level: self.steerable_or(keys::GATE_LOWER_EDGE_LEVEL, 0.0)?,
            gate_opening_width: self.steerable_or(keys::GATE_OPENING_WIDTH, 0.0)?,
            gate_opening_direction: self.opening_direction()?,
        };

        Ok(Weir {
            crest_level: self.required_steerable(keys::CREST_LEVEL)?,
            crest_width: self.optional_f64(keys::CREST_WIDTH)?,
            formula: WeirFormula::GeneralStructure(formula),
        })
    }

    fn gate(&self) -> Result<Gate> {
        let door_height = self
            .optional_f64(keys::GATE_HEIGHT)?
            .ok_or_else(|| self.missing(keys::GATE_HEIGHT))?;

        Ok(Gate {
            door_height,
            sill_width: self.optional_f64(keys::CREST_WIDTH)?.unwrap_or(0.0),
            sill_level: self.steerable_or(keys::CREST_LEVEL, 0.0)?,
            lower_edge_level: self.steerable_or(keys::GATE_LOWER_EDGE_LEVEL, 0.0)?,
            opening_width: self.steerable_or(keys::GATE_OPENING_WIDTH, 0.0)?,
            horizontal_opening_direction: self.opening_direction()?,
        })
    }

    fn levee_breach(&self) -> Result<LeveeBreach> {
        let breach_location = Coordinate::new(
            self.f64_or(keys::START_LOCATION_X, 0.0)?,
            self.f64_or(keys::START_LOCATION_Y, 0.0)?,
        );

        let water_level_locations = match (
            self.optional_f64(keys::WATER_LEVEL_UPSTREAM_LOCATION_X)?,
            self.optional_f64(keys::WATER_LEVEL_UPSTREAM_LOCATION_Y)?,
            self.optional_f64(keys::WATER_LEVEL_DOWNSTREAM_LOCATION_X)?,
            self.optional_f64(keys::WATER_LEVEL_DOWNSTREAM_LOCATION_Y)?,
        ) {
            (Some(up_x), Some(up_y), Some(down_x), Some(down_y)) => Some((
                Coordinate::new(up_x, up_y),
                Coordinate::new(down_x, down_y),
            )),
            _ => None,
        };

        let start_seconds = self.f64_or(keys::T0, 0.0)?;
        let start_time =
            offset_date(self.reference_date, start_seconds, 1000.0).ok_or_else(|| {
                match self.property(keys::T0) {
                    Some(property) => self.invalid_value(property, "a start time in range"),
                    None => self.missing(keys::T0),
                }
            })?;

        let growth = match self.optional_i32(keys::ALGORITHM)? {
            Some(breach_algorithms::VERHEIJ_VD_KNAAP_2002) => {
                BreachGrowth::VerheijVdKnaap2002(VerheijVdKnaapSettings {
                    start_time,
                    initial_crest_level: self.f64_or(keys::CREST_LEVEL_INI, 0.0)?,
                    minimum_crest_level: self.f64_or(keys::CREST_LEVEL_MIN, 0.0)?,
                    initial_breach_width: self.f64_or(keys::BREACH_WIDTH_INI, 0.0)?,
                    factor_f1: self.f64_or(keys::F1, breach_defaults::FACTOR_F1)?,
                    factor_f2: self.f64_or(keys::F2, breach_defaults::FACTOR_F2)?,
                    critical_flow_velocity: self
                        .f64_or(keys::UCR, breach_defaults::CRITICAL_FLOW_VELOCITY)?,
                    period_to_reach_minimum_crest_level: self.f64_or(
                        keys::TIME_TO_BREACH_TO_MAXIMUM_DEPTH,
                        breach_defaults::PERIOD_TO_REACH_MINIMUM_CREST_LEVEL,
                    )?,
                })
            }
            Some(breach_algorithms::USER_DEFINED) => {
                BreachGrowth::UserDefined(UserDefinedBreachSettings {
                    start_time,
                    table: self.breach_table()?,
                })
            }
            Some(other) => {
                warn!(
                    "Levee breach '{}' has unknown growth algorithm {}; no growth settings are used",
                    self.name, other
                );
                BreachGrowth::None
            }
            None => BreachGrowth::None,
        };

        Ok(LeveeBreach {
            breach_location,
            water_level_locations,
            growth_active: self.bool_or(keys::STATE, true)?,
            growth,
        })
    }

    /// User defined breach level and width table, none when the file is absent
    fn breach_table(&self) -> Result<Option<TimeSeries>> {
        let Some(property) = self.property(keys::TIME_FILE_PATH) else {
            return Ok(None);
        };

        let path = self.resolve(&property.raw);
        if !path.is_file() {
            warn!(
                "Breach time series file {} of levee breach '{}' does not exist",
                path.display(),
                self.name
            );
            return Ok(None);
        }
        self.read_time_series(&property.raw).map(Some)
    }
}
