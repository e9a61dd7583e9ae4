//! Sobek rainfall-runoff record types
//!
//! One record type per tagged block kind. Builders take the labelled fields of
//! one block, apply defaults to absent optional fields and fail only when the
//! record `id` is missing.

use crate::ParseError;
use crate::app::services::tagged_records::RecordFields;
use crate::constants::DEFAULT_AREA_ADJUSTMENT_FACTOR;
use serde::{Deserialize, Serialize};

/// A record built from one `TAG ... tag` block
pub trait SobekRecord: Sized {
    /// Opening tag of the block, the closing tag is its lowercase form
    const TAG: &'static str;

    /// Build the record from the fields of one block
    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError>;

    /// Record identifier
    fn id(&self) -> &str;
}

// =============================================================================
// Topology
// =============================================================================

/// `NODE` record of `3B_NOD.TP`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: Option<String>,
    /// Branch the node lies on (`ri`)
    pub branch_id: Option<String>,
    /// Sobek node type code (second value of `mt`)
    pub node_type: Option<i32>,
    /// Object type identifier (`ObID`)
    pub object_id: Option<String>,
    pub x: f64,
    pub y: f64,
}

impl SobekRecord for NodeRecord {
    const TAG: &'static str = "NODE";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let node_type = fields
            .tokens_after("mt", 2)
            .and_then(|values| values.get(1).and_then(|v| v.parse::<i32>().ok()));

        Ok(Self {
            id: fields.require_quoted("id")?,
            name: fields.quoted("nm"),
            branch_id: fields.quoted("ri"),
            node_type,
            object_id: fields.quoted("ObID"),
            x: fields.scalar("px").unwrap_or(0.0),
            y: fields.scalar("py").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Paved Areas
// =============================================================================

/// Sewer pump capacity settings (`qc`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SewerPumpCapacity {
    /// Capacity given by a table instead of fixed values
    pub from_table: bool,
    pub mixed_or_rainfall: f64,
    pub dry_weather_flow: f64,
}

/// `PAVE` record of `PAVED.3B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PavedRecord {
    pub id: String,
    pub area: f64,
    pub street_level: f64,
    pub storage_id: Option<String>,
    /// 0 mixed, 1 separated, 2 improved separated
    pub sewer_type: i32,
    pub pump_capacity: Option<SewerPumpCapacity>,
    /// Discharge targets of the two sewer pumps (`qo`)
    pub pump_discharge_targets: Option<(i32, i32)>,
    pub meteo_station: Option<String>,
    pub area_adjustment_factor: f64,
    pub number_of_inhabitants: f64,
    pub dry_weather_flow_id: Option<String>,
    pub runoff_coefficient: f64,
}

impl SobekRecord for PavedRecord {
    const TAG: &'static str = "PAVE";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let pump_capacity = fields.array("qc", 3).map(|values| SewerPumpCapacity {
            from_table: values[0] != 0.0,
            mixed_or_rainfall: values[1],
            dry_weather_flow: values[2],
        });

        Ok(Self {
            id: fields.require_quoted("id")?,
            area: fields.scalar("ar").unwrap_or(0.0),
            street_level: fields.scalar("lv").unwrap_or(0.0),
            storage_id: fields.quoted("sd"),
            sewer_type: fields.int("ss").unwrap_or(0),
            pump_capacity,
            pump_discharge_targets: fields
                .array("qo", 2)
                .map(|values| (values[0] as i32, values[1] as i32)),
            meteo_station: fields.quoted("ms"),
            area_adjustment_factor: fields
                .scalar("aaf")
                .unwrap_or(DEFAULT_AREA_ADJUSTMENT_FACTOR),
            number_of_inhabitants: fields.scalar("np").unwrap_or(0.0),
            dry_weather_flow_id: fields.quoted("dw"),
            runoff_coefficient: fields.scalar("ru").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Unpaved Areas
// =============================================================================

/// Groundwater drainage formula of an unpaved area (`co`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrainageComputation {
    HellingaDeZeeuw,
    KrayenhoffVanDeLeur,
    Ernst,
}

impl DrainageComputation {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::HellingaDeZeeuw),
            2 => Some(Self::KrayenhoffVanDeLeur),
            3 => Some(Self::Ernst),
            _ => None,
        }
    }
}

/// `UNPV` record of `UNPAVED.3B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpavedRecord {
    pub id: String,
    /// Area per crop type, `na` values
    pub crop_areas: Vec<f64>,
    pub groundwater_area: f64,
    pub surface_level: f64,
    pub drainage_computation: Option<DrainageComputation>,
    pub reservoir_coefficient: f64,
    pub drainage_definition_id: Option<String>,
    pub storage_id: Option<String>,
    pub alfa_id: Option<String>,
    pub seepage_id: Option<String>,
    pub infiltration_id: Option<String>,
    pub soil_type: Option<i32>,
    pub initial_groundwater_level: Option<f64>,
    pub maximum_groundwater_level: Option<f64>,
    pub groundwater_layer_thickness: f64,
    pub initial_salt_concentration: f64,
    pub meteo_station: Option<String>,
    pub area_adjustment_factor: f64,
}

impl SobekRecord for UnpavedRecord {
    const TAG: &'static str = "UNPV";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let id = fields.require_quoted("id")?;
        let crop_count = fields.count("na")?;
        let crop_areas = if crop_count == 0 {
            Vec::new()
        } else {
            fields
                .array("ar", crop_count)
                .unwrap_or_else(|| vec![0.0; crop_count])
        };

        Ok(Self {
            id,
            crop_areas,
            groundwater_area: fields.scalar("ga").unwrap_or(0.0),
            surface_level: fields.scalar("lv").unwrap_or(0.0),
            drainage_computation: fields.int("co").and_then(DrainageComputation::from_code),
            reservoir_coefficient: fields.scalar("rc").unwrap_or(0.0),
            drainage_definition_id: fields.quoted("ed"),
            storage_id: fields.quoted("sd"),
            alfa_id: fields.quoted("ad").filter(|id| !id.is_empty()),
            seepage_id: fields.quoted("sp"),
            infiltration_id: fields.quoted("ic"),
            soil_type: fields.int("bt"),
            initial_groundwater_level: fields.array("ig", 2).map(|values| values[1]),
            maximum_groundwater_level: fields.scalar("mg"),
            groundwater_layer_thickness: fields.scalar("gl").unwrap_or(0.0),
            initial_salt_concentration: fields.scalar("is").unwrap_or(0.0),
            meteo_station: fields.quoted("ms"),
            area_adjustment_factor: fields
                .scalar("aaf")
                .unwrap_or(DEFAULT_AREA_ADJUSTMENT_FACTOR),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Storage Definitions
// =============================================================================

/// `STDF` record of the `*.STO` and roof storage files
///
/// Unpaved storage uses `ml`/`il`, paved storage `ms`/`is`/`mr`/`ir` and
/// greenhouse roofs `mk`/`ik`; fields of the other kinds stay none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub id: String,
    pub name: Option<String>,
    pub max_land_storage: Option<f64>,
    pub initial_land_storage: Option<f64>,
    pub max_street_storage: Option<f64>,
    pub initial_street_storage: Option<f64>,
    /// Rainfall/mixed and dry-weather-flow sewer storage
    pub max_sewer_storage: Option<(f64, f64)>,
    pub initial_sewer_storage: Option<(f64, f64)>,
    pub max_roof_storage: Option<f64>,
    pub initial_roof_storage: Option<f64>,
}

impl SobekRecord for StorageRecord {
    const TAG: &'static str = "STDF";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let pair = |label: &str| fields.array(label, 2).map(|values| (values[0], values[1]));

        Ok(Self {
            id: fields.require_quoted("id")?,
            name: fields.quoted("nm"),
            max_land_storage: fields.scalar("ml"),
            initial_land_storage: fields.scalar("il"),
            max_street_storage: fields.scalar("ms"),
            initial_street_storage: fields.scalar("is"),
            max_sewer_storage: pair("mr"),
            initial_sewer_storage: pair("ir"),
            max_roof_storage: fields.scalar("mk"),
            initial_roof_storage: fields.scalar("ik"),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Boundaries
// =============================================================================

/// Water level condition of a boundary (`bl`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryLevel {
    Constant(f64),
    /// Level from a table or an online coupled model
    Variable(Option<String>),
}

/// `BOUN` record of `BOUND3B.3B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub id: String,
    pub level: BoundaryLevel,
    pub initial_salt_concentration: f64,
}

impl SobekRecord for BoundaryRecord {
    const TAG: &'static str = "BOUN";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let level = match fields.int("bl") {
            Some(0) | None => {
                BoundaryLevel::Constant(fields.array("bl", 2).map_or(0.0, |values| values[1]))
            }
            Some(_) => BoundaryLevel::Variable(
                fields
                    .tokens_after("bl", 2)
                    .and_then(|values| values.get(1).cloned()),
            ),
        };

        Ok(Self {
            id: fields.require_quoted("id")?,
            level,
            initial_salt_concentration: fields.scalar("is").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Greenhouses
// =============================================================================

/// `GRNH` record of `GREENHSE.3B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenhouseRecord {
    pub id: String,
    /// Area per greenhouse class, `na` values
    pub areas: Vec<f64>,
    pub surface_level: f64,
    pub silo_area: f64,
    pub silo_id: Option<String>,
    pub storage_id: Option<String>,
    pub meteo_station: Option<String>,
    pub area_adjustment_factor: f64,
    pub initial_salt_concentration: f64,
}

impl SobekRecord for GreenhouseRecord {
    const TAG: &'static str = "GRNH";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        let id = fields.require_quoted("id")?;
        let area_count = fields.count("na")?;
        let areas = if area_count == 0 {
            Vec::new()
        } else {
            fields
                .array("ar", area_count)
                .unwrap_or_else(|| vec![0.0; area_count])
        };

        Ok(Self {
            id,
            areas,
            surface_level: fields.scalar("sl").unwrap_or(0.0),
            silo_area: fields.scalar("as").unwrap_or(0.0),
            silo_id: fields.quoted("si"),
            storage_id: fields.quoted("sd"),
            meteo_station: fields.quoted("ms"),
            area_adjustment_factor: fields
                .scalar("aaf")
                .unwrap_or(DEFAULT_AREA_ADJUSTMENT_FACTOR),
            initial_salt_concentration: fields.scalar("is").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Seepage and Infiltration
// =============================================================================

/// `SEEP` record of `UNPAVED.SEP`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeepageRecord {
    pub id: String,
    pub name: Option<String>,
    /// 1 constant, 2 variable from h0 table, 3/4 from modflow, 5 from table
    pub computation_option: i32,
    pub seepage: f64,
    pub resistance: Option<f64>,
    pub h0_table_id: Option<String>,
    pub salt_concentration: f64,
}

impl SobekRecord for SeepageRecord {
    const TAG: &'static str = "SEEP";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            id: fields.require_quoted("id")?,
            name: fields.quoted("nm"),
            computation_option: fields.int("co").unwrap_or(1),
            seepage: fields.scalar("sp").unwrap_or(0.0),
            resistance: fields.scalar("cv"),
            h0_table_id: fields.quoted("h0"),
            salt_concentration: fields.scalar("ss").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// `INFC` record of `UNPAVED.INF`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfiltrationRecord {
    pub id: String,
    pub name: Option<String>,
    pub infiltration_capacity: f64,
}

impl SobekRecord for InfiltrationRecord {
    const TAG: &'static str = "INFC";

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            id: fields.require_quoted("id")?,
            name: fields.quoted("nm"),
            infiltration_capacity: fields.scalar("ic").unwrap_or(0.0),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}
