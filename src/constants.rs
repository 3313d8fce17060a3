//! Application constants for the NEM12 parser
//!
//! This module contains the record codes, field layout, default values and
//! fixed messages used throughout the parser.

// =============================================================================
// Record Type Codes
// =============================================================================

/// Record type codes that appear in the first field of every line
pub mod record_codes {
    /// Header record marking the start of the file
    pub const FILE_START: &str = "100";

    /// NMI data details record: declares the meter and its unit of measure
    pub const NMI_DATA_DETAILS: &str = "200";

    /// Interval data record: one dated volume reading
    pub const INTERVAL_DATA: &str = "300";

    /// End of data record marking the end of the file
    pub const FILE_END: &str = "900";
}

/// Minimum number of fields each record type must carry
pub mod field_counts {
    pub const FILE_START: usize = 1;
    pub const NMI_DATA_DETAILS: usize = 3;
    pub const INTERVAL_DATA: usize = 4;
    pub const FILE_END: usize = 1;
}

/// Field positions within a `200` record
pub mod nmi_fields {
    pub const NMI: usize = 1;
    pub const UNIT: usize = 2;
}

/// Field positions within a `300` record
pub mod interval_fields {
    pub const DATE: usize = 1;
    pub const VOLUME: usize = 2;
    pub const QUALITY: usize = 3;
}

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Field delimiter used by the simplified NEM12 format
pub const DEFAULT_DELIMITER: char = ',';

/// chrono format string for the `YYYYMMDD` interval date
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";

/// Exact width of an interval date field
pub const DATE_FIELD_WIDTH: usize = 8;

/// Shortest NMI accepted in a `200` record
pub const MIN_NMI_LENGTH: usize = 10;

/// Number of boundary markers (one `100` plus one `900`) a valid file contains
pub const EXPECTED_BOUNDARY_MARKERS: usize = 2;

// =============================================================================
// Energy Units and Quality Flags
// =============================================================================

/// Unit of measure codes accepted in `200` records
pub mod unit_codes {
    pub const KWH: &str = "KWH";
    pub const MWH: &str = "MWH";
    pub const WH: &str = "WH";
    pub const KVARH: &str = "KVARH";
    pub const KVAH: &str = "KVAH";
    /// General supply import stream, reported in kWh
    pub const E1: &str = "E1";
}

/// Quality method flags accepted in `300` records
pub mod quality_codes {
    /// Actual reading
    pub const ACTUAL: &str = "A";
    /// Forward estimate
    pub const ESTIMATED: &str = "E";
    /// Final substitute
    pub const FINAL_SUBSTITUTE: &str = "F";
    /// Substituted value
    pub const SUBSTITUTED: &str = "S";
    /// Null data
    pub const NULL: &str = "N";
}

// =============================================================================
// Error Messages
// =============================================================================

/// Message reported when the file does not contain exactly one start and end marker
pub const MALFORMED_STREAM_MESSAGE: &str = "Beginning/End of record not found.";

/// Message reported when a `200` record carries an unusable NMI
pub const INVALID_NMI_MESSAGE: &str = "Invalid NMI encountered";
