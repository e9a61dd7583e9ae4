//! Application constants for hydro file processing
//!
//! This module contains the file names, tags, property keys, layout widths and
//! default values shared by the readers, writers and structure builders.

// =============================================================================
// File Extensions and Sobek File Names
// =============================================================================

/// Polyline file extension
pub const PLI_EXTENSION: &str = "pli";

/// Polyline file with z values
pub const PLIZ_EXTENSION: &str = "pliz";

/// Polygon file extension
pub const POL_EXTENSION: &str = "pol";

/// Sample points with a value column
pub const XYZ_EXTENSION: &str = "xyz";

/// Named observation points
pub const XYN_EXTENSION: &str = "xyn";

/// Time series relative to the model reference date
pub const TIM_EXTENSION: &str = "tim";

/// Vertical profile time series
pub const T3D_EXTENSION: &str = "t3d";

/// Structure definitions
pub const INI_EXTENSION: &str = "ini";

/// Sobek RR file names and the record tag each one carries
pub mod sobek_files {
    /// Node topology
    pub const NODES: (&str, &str) = ("3B_NOD.TP", "NODE");

    /// Paved areas
    pub const PAVED: (&str, &str) = ("PAVED.3B", "PAVE");

    /// Unpaved areas
    pub const UNPAVED: (&str, &str) = ("UNPAVED.3B", "UNPV");

    /// Paved area storage
    pub const PAVED_STORAGE: (&str, &str) = ("PAVED.STO", "STDF");

    /// Unpaved area storage
    pub const UNPAVED_STORAGE: (&str, &str) = ("UNPAVED.STO", "STDF");

    /// Greenhouse roof storage
    pub const GREENHOUSE_STORAGE: (&str, &str) = ("GREENHSE.RF", "STDF");

    /// Boundaries
    pub const BOUNDARIES: (&str, &str) = ("BOUND3B.3B", "BOUN");

    /// Greenhouse areas
    pub const GREENHOUSES: (&str, &str) = ("GREENHSE.3B", "GRNH");

    /// Unpaved seepage definitions
    pub const SEEPAGE: (&str, &str) = ("UNPAVED.SEP", "SEEP");

    /// Unpaved infiltration definitions
    pub const INFILTRATION: (&str, &str) = ("UNPAVED.INF", "INFC");

    /// All known Sobek RR files
    pub const ALL: &[(&str, &str)] = &[
        NODES,
        PAVED,
        UNPAVED,
        PAVED_STORAGE,
        UNPAVED_STORAGE,
        GREENHOUSE_STORAGE,
        BOUNDARIES,
        GREENHOUSES,
        SEEPAGE,
        INFILTRATION,
    ];
}

// =============================================================================
// Text Layout
// =============================================================================

/// Coordinate value that separates sub-features within one polyline block
pub const PLI_SEPARATOR_VALUE: f64 = -999.0;

/// Width of the right-aligned numeric fields in `.pliz`, `.pol` and point files
pub const FIXED_FIELD_WIDTH: usize = 24;

/// Number of lines between two progress reports while reading geometry files
pub const PROGRESS_LINE_INTERVAL: usize = 100;

/// Prefixes that mark a full-line comment
pub const COMMENT_PREFIXES: &[char] = &['*', '#'];

/// Name of the numeric attribute stored in polyline column `n` (3..=9)
pub const PLI_NUMERIC_COLUMN_PREFIX: &str = "Column";

/// First and last numeric attribute columns of a polyline row
pub const PLI_FIRST_ATTRIBUTE_COLUMN: usize = 3;
pub const PLI_LAST_NUMERIC_COLUMN: usize = 9;

/// Column 10 of a polyline row holds a string attribute
pub const PLI_WEIR_TYPE_COLUMN: usize = 10;
pub const PLI_WEIR_TYPE_ATTRIBUTE: &str = "WeirType";

/// Padding of keys and values in written `.ini` property lines
pub const INI_KEY_WIDTH: usize = 22;
pub const INI_VALUE_WIDTH: usize = 20;

// =============================================================================
// Structures File
// =============================================================================

/// Section and header keys of a structures file
pub mod structure_file {
    /// Header section
    pub const GENERAL_SECTION: &str = "General";

    /// Section holding one structure
    pub const STRUCTURE_SECTION: &str = "structure";

    /// Header key for the `<major>.<minor>` file version
    pub const FILE_VERSION_KEY: &str = "fileVersion";

    /// Header key for the file type
    pub const FILE_TYPE_KEY: &str = "fileType";

    /// Expected header file type
    pub const FILE_TYPE: &str = "structure";

    /// Highest supported file version
    pub const SUPPORTED_MAJOR_VERSION: u32 = 2;
    pub const SUPPORTED_MINOR_VERSION: u32 = 0;
}

/// Property keys of structure sections
pub mod structure_keys {
    pub const TYPE: &str = "type";
    pub const ID: &str = "id";
    pub const POLYLINE_FILE: &str = "polylinefile";
    pub const NUM_COORDINATES: &str = "numCoordinates";
    pub const X_COORDINATES: &str = "xCoordinates";
    pub const Y_COORDINATES: &str = "yCoordinates";
    pub const X: &str = "x";
    pub const Y: &str = "y";

    // Pump
    pub const CAPACITY: &str = "capacity";
    pub const START_LEVEL_SUCTION_SIDE: &str = "startLevelSuctionSide";
    pub const STOP_LEVEL_SUCTION_SIDE: &str = "stopLevelSuctionSide";
    pub const START_LEVEL_DELIVERY_SIDE: &str = "startLevelDeliverySide";
    pub const STOP_LEVEL_DELIVERY_SIDE: &str = "stopLevelDeliverySide";
    pub const NUM_REDUCTION_LEVELS: &str = "numReductionLevels";
    pub const HEAD: &str = "head";
    pub const REDUCTION_FACTOR: &str = "reductionFactor";

    // Weir and gate
    pub const CREST_LEVEL: &str = "crestLevel";
    pub const CREST_WIDTH: &str = "crestWidth";
    pub const CORRECTION_COEFFICIENT: &str = "corrCoeff";
    pub const USE_VELOCITY_HEIGHT: &str = "useVelocityHeight";
    pub const GATE_HEIGHT: &str = "gateHeight";
    pub const GATE_LOWER_EDGE_LEVEL: &str = "gateLowerEdgeLevel";
    pub const GATE_OPENING_WIDTH: &str = "gateOpeningWidth";
    pub const GATE_OPENING_HORIZONTAL_DIRECTION: &str = "gateOpeningHorizontalDirection";

    // General structure
    pub const UPSTREAM1_WIDTH: &str = "upstream1Width";
    pub const UPSTREAM1_LEVEL: &str = "upstream1Level";
    pub const UPSTREAM2_WIDTH: &str = "upstream2Width";
    pub const UPSTREAM2_LEVEL: &str = "upstream2Level";
    pub const DOWNSTREAM1_WIDTH: &str = "downstream1Width";
    pub const DOWNSTREAM1_LEVEL: &str = "downstream1Level";
    pub const DOWNSTREAM2_WIDTH: &str = "downstream2Width";
    pub const DOWNSTREAM2_LEVEL: &str = "downstream2Level";
    pub const POS_FREE_GATE_FLOW_COEFF: &str = "posFreeGateFlowCoeff";
    pub const POS_DROWN_GATE_FLOW_COEFF: &str = "posDrownGateFlowCoeff";
    pub const POS_FREE_WEIR_FLOW_COEFF: &str = "posFreeWeirFlowCoeff";
    pub const POS_DROWN_WEIR_FLOW_COEFF: &str = "posDrownWeirFlowCoeff";
    pub const POS_CONTR_COEF_FREE_GATE: &str = "posContrCoefFreeGate";
    pub const NEG_FREE_GATE_FLOW_COEFF: &str = "negFreeGateFlowCoeff";
    pub const NEG_DROWN_GATE_FLOW_COEFF: &str = "negDrownGateFlowCoeff";
    pub const NEG_FREE_WEIR_FLOW_COEFF: &str = "negFreeWeirFlowCoeff";
    pub const NEG_DROWN_WEIR_FLOW_COEFF: &str = "negDrownWeirFlowCoeff";
    pub const NEG_CONTR_COEF_FREE_GATE: &str = "negContrCoefFreeGate";
    pub const EXTRA_RESISTANCE: &str = "extraResistance";

    // Levee breach
    pub const START_LOCATION_X: &str = "startLocationX";
    pub const START_LOCATION_Y: &str = "startLocationY";
    pub const WATER_LEVEL_UPSTREAM_LOCATION_X: &str = "waterLevelUpstreamLocationX";
    pub const WATER_LEVEL_UPSTREAM_LOCATION_Y: &str = "waterLevelUpstreamLocationY";
    pub const WATER_LEVEL_DOWNSTREAM_LOCATION_X: &str = "waterLevelDownstreamLocationX";
    pub const WATER_LEVEL_DOWNSTREAM_LOCATION_Y: &str = "waterLevelDownstreamLocationY";
    pub const ALGORITHM: &str = "algorithm";
    pub const T0: &str = "t0";
    pub const STATE: &str = "state";
    pub const CREST_LEVEL_INI: &str = "crestLevelIni";
    pub const CREST_LEVEL_MIN: &str = "crestLevelMin";
    pub const BREACH_WIDTH_INI: &str = "breachWidthIni";
    pub const F1: &str = "f1";
    pub const F2: &str = "f2";
    pub const UCR: &str = "ucr";
    pub const TIME_TO_BREACH_TO_MAXIMUM_DEPTH: &str = "timeToBreachToMaximumDepth";
    pub const TIME_FILE_PATH: &str = "timeFilePath";
}

/// Legacy property keys and the keys that replaced them
pub const LEGACY_PROPERTY_KEYS: &[(&str, &str)] = &[
    ("levelcenter", "crestLevel"),
    ("widthcenter", "crestWidth"),
    ("widthleftW1", "upstream1Width"),
    ("levelleftZb1", "upstream1Level"),
    ("widthleftWsdl", "upstream2Width"),
    ("levelleftZbsl", "upstream2Level"),
    ("widthrightWsdr", "downstream1Width"),
    ("levelrightZbsr", "downstream1Level"),
    ("widthrightW2", "downstream2Width"),
    ("levelrightZb2", "downstream2Level"),
    ("gateheight", "gateLowerEdgeLevel"),
    ("gatedoorheight", "gateHeight"),
    ("door_opening_width", "gateOpeningWidth"),
    ("opening_width", "gateOpeningWidth"),
    ("sill_level", "crestLevel"),
    ("crest_level", "crestLevel"),
    ("sill_width", "crestWidth"),
    ("crest_width", "crestWidth"),
    ("lower_edge_level", "gateLowerEdgeLevel"),
    ("door_height", "gateHeight"),
    ("horizontal_opening_direction", "gateOpeningHorizontalDirection"),
];

/// Steerable marker for values driven by an external controller
pub const REALTIME_MARKER: &str = "REALTIME";

/// Levee breach growth algorithm codes
pub mod breach_algorithms {
    pub const VERHEIJ_VD_KNAAP_2002: i32 = 2;
    pub const USER_DEFINED: i32 = 3;
}

/// Verheij-vdKnaap (2002) settings applied when a breach definition omits them
pub mod breach_defaults {
    pub const FACTOR_F1: f64 = 1.3;
    pub const FACTOR_F2: f64 = 0.04;
    pub const CRITICAL_FLOW_VELOCITY: f64 = 0.2;

    /// Seconds
    pub const PERIOD_TO_REACH_MINIMUM_CREST_LEVEL: f64 = 3600.0;
}

// =============================================================================
// Model Schema
// =============================================================================

/// Column names of a model property schema CSV file
pub mod schema_columns {
    pub const KEY: &str = "key";
    pub const TYPE: &str = "type";
    pub const CAPTION: &str = "caption";
    pub const DEFAULT: &str = "default";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const CATEGORY: &str = "category";
    pub const SUBCATEGORY: &str = "subcategory";
    pub const STRUCTURE_TYPE: &str = "structuretype";
    pub const DESCRIPTION: &str = "description";
    pub const UNIT: &str = "unit";
}

/// Accepted date-time layouts, tried in order
pub const DATE_TIME_FORMATS: &[&str] = &["%Y%m%d%H%M%S", "%Y-%m-%d %H:%M:%S"];

/// Accepted date-only layouts, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d"];

/// Layout of written date-time values
pub const DATE_TIME_WRITE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Layout of written date-only values
pub const DATE_WRITE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Defaults
// =============================================================================

/// Default model reference date used when none is configured
pub const DEFAULT_REFERENCE_DATE: &str = "2000-01-01 00:00:00";

/// Area adjustment factor applied when a Sobek record omits `aaf`
pub const DEFAULT_AREA_ADJUSTMENT_FACTOR: f64 = 1.0;

/// Default weir correction coefficient
pub const DEFAULT_CORRECTION_COEFFICIENT: f64 = 1.0;

/// Default general-structure flow coefficient
pub const DEFAULT_FLOW_COEFFICIENT: f64 = 1.0;
