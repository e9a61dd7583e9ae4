//! Structure sections for writing
//!
//! Time-series values are written to `{name}_{key}.tim` companions and line
//! geometries to `{name}.pli` companions next to the reference file.

use chrono::NaiveDateTime;
use std::path::Path;

use crate::app::models::{
    BreachGrowth, Feature2D, Gate, GeneralStructureFormula, Geometry, LeveeBreach, Pump,
    Structure, StructureKind, TimeDependent, Weir, WeirFormula,
};
use crate::app::services::geometry_files::PliFile;
use crate::app::services::ini::{IniProperty, IniSection};
use crate::app::services::log_handler::LogHandler;
use crate::app::services::model_schema::ModelSchema;
use crate::app::services::text_reader::format_f64;
use crate::app::services::timeseries_files::TimFile;
use crate::config::{GeometryConfig, StructuresConfig};
use crate::constants::{breach_algorithms, structure_file, structure_keys as keys};
use crate::Result;

/// `[General]` header for the highest supported file version
pub fn general_section(config: &StructuresConfig) -> IniSection {
    let mut section = IniSection::new(structure_file::GENERAL_SECTION);
    section.add_property(IniProperty::new(
        structure_file::FILE_VERSION_KEY,
        format!(
            "{}.{:02}",
            config.supported_major_version, config.supported_minor_version
        ),
        "File format version",
    ));
    section.add_property(IniProperty::new(
        structure_file::FILE_TYPE_KEY,
        structure_file::FILE_TYPE,
        "File type",
    ));
    section
}

/// Builds the `[structure]` section of one structure
pub struct SectionWriter<'a> {
    schema: &'a ModelSchema,
    structure: &'a Structure,
    directory: &'a Path,
    reference_date: NaiveDateTime,
    geometry: &'a GeometryConfig,
    section: IniSection,
}

impl<'a> SectionWriter<'a> {
    pub fn new(
        schema: &'a ModelSchema,
        structure: &'a Structure,
        directory: &'a Path,
        reference_date: NaiveDateTime,
        geometry: &'a GeometryConfig,
    ) -> Self {
        Self {
            schema,
            structure,
            directory,
            reference_date,
            geometry,
            section: IniSection::new(structure_file::STRUCTURE_SECTION),
        }
    }

    /// Build the section, writing companion files on the way
    pub fn write(mut self, log: &mut LogHandler) -> Result<IniSection> {
        let structure = self.structure;
        self.add(keys::TYPE, structure.type_name());
        self.add(keys::ID, &structure.name);
        self.add_geometry(log)?;

        match &structure.kind {
            StructureKind::Pump(pump) => self.add_pump(pump)?,
            StructureKind::Weir(weir) => self.add_weir(weir)?,
            StructureKind::Gate(gate) => self.add_gate(gate)?,
            StructureKind::LeveeBreach(breach) => self.add_levee_breach(breach)?,
        }

        Ok(self.section)
    }

    /// Property with the schema description as comment
    fn add(&mut self, key: &str, value: impl Into<String>) {
        let comment = self
            .schema
            .structure_definition(self.structure.type_name(), key)
            .map(|definition| definition.description.clone())
            .unwrap_or_default();
        self.section
            .add_property(IniProperty::new(key, value, comment));
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.add(key, format_f64(value));
    }

    fn add_optional_f64(&mut self, key: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.add_f64(key, value);
        }
    }

    fn add_doubles(&mut self, key: &str, values: impl Iterator<Item = f64>) {
        let text = values.map(format_f64).collect::<Vec<_>>().join(" ");
        self.add(key, text);
    }

    fn add_time_dependent(&mut self, key: &str, value: &TimeDependent) -> Result<()> {
        match value {
            TimeDependent::Constant(constant) => self.add_f64(key, *constant),
            TimeDependent::Series(series) => {
                let file_name = format!("{}_{}.tim", self.structure.name, key);
                TimFile::new(self.reference_date).write(
                    &self.directory.join(&file_name),
                    series,
                    &[],
                )?;
                self.add(key, file_name);
            }
        }
        Ok(())
    }

    fn add_geometry(&mut self, log: &mut LogHandler) -> Result<()> {
        let structure = self.structure;
        let Some(geometry) = &structure.geometry else {
            return Ok(());
        };

        match geometry {
            Geometry::Point(point) => {
                self.add(keys::NUM_COORDINATES, "1");
                self.add_f64(keys::X_COORDINATES, point.x);
                self.add_f64(keys::Y_COORDINATES, point.y);
            }
            Geometry::LineString(_) => {
                let file_name = format!("{}.pli", structure.name);
                let feature = Feature2D::new(&structure.name, geometry.clone());
                PliFile::new(self.geometry).write(
                    &self.directory.join(&file_name),
                    &[feature],
                    log,
                )?;
                self.add(keys::POLYLINE_FILE, file_name);
            }
            Geometry::Polygon(_) => log.report_error(format!(
                "Geometry type 'Polygon' for structure '{}' not supported and therefore not written",
                structure.name
            )),
        }
        Ok(())
    }

    fn add_pump(&mut self, pump: &Pump) -> Result<()> {
        self.add_time_dependent(keys::CAPACITY, &pump.capacity)?;
        self.add_optional_f64(keys::START_LEVEL_SUCTION_SIDE, pump.start_level_suction_side);
        self.add_optional_f64(keys::STOP_LEVEL_SUCTION_SIDE, pump.stop_level_suction_side);
        self.add_optional_f64(keys::START_LEVEL_DELIVERY_SIDE, pump.start_level_delivery_side);
        self.add_optional_f64(keys::STOP_LEVEL_DELIVERY_SIDE, pump.stop_level_delivery_side);

        match pump.reduction_table.as_slice() {
            table if table.is_empty() || *table == [(0.0, 1.0)] => {}
            [(_, factor)] => {
                self.add(keys::NUM_REDUCTION_LEVELS, "1");
                self.add_f64(keys::REDUCTION_FACTOR, *factor);
            }
            table => {
                self.add(keys::NUM_REDUCTION_LEVELS, table.len().to_string());
                self.add_doubles(keys::HEAD, table.iter().map(|(head, _)| *head));
                self.add_doubles(keys::REDUCTION_FACTOR, table.iter().map(|(_, factor)| *factor));
            }
        }
        Ok(())
    }

    fn add_weir(&mut self, weir: &Weir) -> Result<()> {
        self.add_time_dependent(keys::CREST_LEVEL, &weir.crest_level)?;
        self.add_optional_f64(keys::CREST_WIDTH, weir.crest_width);

        match &weir.formula {
            WeirFormula::Simple(formula) => {
                self.add_f64(keys::CORRECTION_COEFFICIENT, formula.correction_coefficient);
                self.add(
                    keys::USE_VELOCITY_HEIGHT,
                    formula.use_velocity_height.to_string(),
                );
                Ok(())
            }
            WeirFormula::GeneralStructure(formula) => self.add_general_structure(formula),
        }
    }

    fn add_general_structure(&mut self, formula: &GeneralStructureFormula) -> Result<()> {
        self.add_optional_f64(keys::UPSTREAM1_WIDTH, formula.upstream1_width);
        self.add_optional_f64(keys::UPSTREAM2_WIDTH, formula.upstream2_width);
        self.add_optional_f64(keys::DOWNSTREAM1_WIDTH, formula.downstream1_width);
        self.add_optional_f64(keys::DOWNSTREAM2_WIDTH, formula.downstream2_width);
        self.add_f64(keys::UPSTREAM1_LEVEL, formula.upstream1_level);
        self.add_f64(keys::UPSTREAM2_LEVEL, formula.upstream2_level);
        self.add_f64(keys::DOWNSTREAM1_LEVEL, formula.downstream1_level);
        self.add_f64(keys::DOWNSTREAM2_LEVEL, formula.downstream2_level);
        self.add_time_dependent(keys::GATE_LOWER_EDGE_LEVEL, &formula.gate_lower_edge_level)?;

        let coefficients = [
            (keys::POS_FREE_GATE_FLOW_COEFF, formula.positive_free_gate_flow),
            (keys::POS_DROWN_GATE_FLOW_COEFF, formula.positive_drowned_gate_flow),
            (keys::POS_FREE_WEIR_FLOW_COEFF, formula.positive_free_weir_flow),
            (keys::POS_DROWN_WEIR_FLOW_COEFF, formula.positive_drowned_weir_flow),
            (keys::POS_CONTR_COEF_FREE_GATE, formula.positive_contraction_coefficient),
            (keys::NEG_FREE_GATE_FLOW_COEFF, formula.negative_free_gate_flow),
            (keys::NEG_DROWN_GATE_FLOW_COEFF, formula.negative_drowned_gate_flow),
            (keys::NEG_FREE_WEIR_FLOW_COEFF, formula.negative_free_weir_flow),
            (keys::NEG_DROWN_WEIR_FLOW_COEFF, formula.negative_drowned_weir_flow),
            (keys::NEG_CONTR_COEF_FREE_GATE, formula.negative_contraction_coefficient),
        ];
        for (key, value) in coefficients {
            self.add_f64(key, value);
        }

        self.add_f64(keys::EXTRA_RESISTANCE, formula.extra_resistance);
        self.add_f64(keys::GATE_HEIGHT, formula.gate_height);
        self.add_time_dependent(keys::GATE_OPENING_WIDTH, &formula.gate_opening_width)?;
        self.add(
            keys::GATE_OPENING_HORIZONTAL_DIRECTION,
            formula.gate_opening_direction.as_str(),
        );
        Ok(())
    }

    fn add_gate(&mut self, gate: &Gate) -> Result<()> {
        self.add_f64(keys::GATE_HEIGHT, gate.door_height);
        self.add_f64(keys::CREST_WIDTH, gate.sill_width);
        self.add_time_dependent(keys::CREST_LEVEL, &gate.sill_level)?;
        self.add_time_dependent(keys::GATE_LOWER_EDGE_LEVEL, &gate.lower_edge_level)?;
        self.add_time_dependent(keys::GATE_OPENING_WIDTH, &gate.opening_width)?;
        self.add(
            keys::GATE_OPENING_HORIZONTAL_DIRECTION,
            gate.horizontal_opening_direction.as_str(),
        );
        Ok(())
    }

    fn add_levee_breach(&mut self, breach: &LeveeBreach) -> Result<()> {
        self.add_f64(keys::START_LOCATION_X, breach.breach_location.x);
        self.add_f64(keys::START_LOCATION_Y, breach.breach_location.y);
        if let Some((upstream, downstream)) = &breach.water_level_locations {
            self.add_f64(keys::WATER_LEVEL_UPSTREAM_LOCATION_X, upstream.x);
            self.add_f64(keys::WATER_LEVEL_UPSTREAM_LOCATION_Y, upstream.y);
            self.add_f64(keys::WATER_LEVEL_DOWNSTREAM_LOCATION_X, downstream.x);
            self.add_f64(keys::WATER_LEVEL_DOWNSTREAM_LOCATION_Y, downstream.y);
        }
        self.add(
            keys::STATE,
            String::from(if breach.growth_active { "1" } else { "0" }),
        );

        match &breach.growth {
            BreachGrowth::None => {}
            BreachGrowth::VerheijVdKnaap2002(settings) => {
                self.add(
                    keys::ALGORITHM,
                    breach_algorithms::VERHEIJ_VD_KNAAP_2002.to_string(),
                );
                self.add_start_time(settings.start_time);
                self.add_f64(keys::CREST_LEVEL_INI, settings.initial_crest_level);
                self.add_f64(keys::CREST_LEVEL_MIN, settings.minimum_crest_level);
                self.add_f64(keys::BREACH_WIDTH_INI, settings.initial_breach_width);
                self.add_f64(keys::F1, settings.factor_f1);
                self.add_f64(keys::F2, settings.factor_f2);
                self.add_f64(keys::UCR, settings.critical_flow_velocity);
                self.add_f64(
                    keys::TIME_TO_BREACH_TO_MAXIMUM_DEPTH,
                    settings.period_to_reach_minimum_crest_level,
                );
            }
            BreachGrowth::UserDefined(settings) => {
                self.add(keys::ALGORITHM, breach_algorithms::USER_DEFINED.to_string());
                self.add_start_time(settings.start_time);
                if let Some(table) = &settings.table {
                    self.add_time_dependent(
                        keys::TIME_FILE_PATH,
                        &TimeDependent::Series(table.clone()),
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Breach start as seconds after the reference date
    fn add_start_time(&mut self, start_time: NaiveDateTime) {
        let seconds = (start_time - self.reference_date).num_milliseconds() as f64 / 1000.0;
        self.add_f64(keys::T0, seconds);
    }
}
