//! NEM12 Parser Library
//!
//! A Rust library for reading simplified NEM12 meter data files into
//! in-memory readings grouped by National Meter Identifier (NMI).
//!
//! A file is a stream of comma-separated records:
//! - `100` marks the start of the file
//! - `200,<nmi>,<unit>` opens a block of readings for one meter
//! - `300,<YYYYMMDD>,<volume>,<quality>` is one dated volume reading
//! - `900` marks the end of the file
//!
//! The parser validates the file boundaries, the NMI, dates and the unit and
//! quality codes, and returns one [`MeterRead`] per meter with exact decimal
//! volumes.
//!
//! ```rust
//! use rust_decimal::Decimal;
//!
//! let lines = [
//!     "100",
//!     "200,6123456789,KWH",
//!     "300,20161113,-50.8,A",
//!     "300,20161114,-25.3,E",
//!     "900",
//! ];
//!
//! let reads = nem12_parser::parse(lines)?;
//! assert_eq!(reads.len(), 1);
//! assert_eq!(reads[0].total_volume(), Decimal::new(-761, 1));
//! # Ok::<(), nem12_parser::Error>(())
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod nem12_parser;
    }
}

// Re-export commonly used types
pub use app::models::{EnergyUnit, MeterRead, MeterVolume, Quality};
pub use app::services::nem12_parser::{Nem12Parser, ParseResult, ParseStats};
pub use config::ParserConfig;

/// Parse a sequence of lines with the default configuration
///
/// Shorthand for `Nem12Parser::new().parse(lines)`.
pub fn parse<I, S>(lines: I) -> Result<Vec<MeterRead>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Nem12Parser::new().parse(lines)
}

/// Result type alias for the NEM12 parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for NEM12 parsing operations
///
/// Most variants abort the parse. [`Error::InvalidDate`],
/// [`Error::UnknownRecordType`] and [`Error::MalformedRecord`] only describe a
/// single skipped line; see [`Error::is_recoverable`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The file does not contain exactly one start and one end marker
    #[error("{}", constants::MALFORMED_STREAM_MESSAGE)]
    MalformedStream {
        start_markers: usize,
        end_markers: usize,
    },

    /// A `200` record carried an empty or too short NMI
    #[error("{}", constants::INVALID_NMI_MESSAGE)]
    InvalidIdentifier { nmi: String },

    /// A `200` record carried an unrecognised unit of measure
    #[error("Invalid energy unit '{code}'")]
    InvalidUnit { code: String },

    /// A `300` record carried an unrecognised quality flag
    #[error("Invalid quality flag '{code}'")]
    InvalidQuality { code: String },

    /// A `300` record carried a volume that is not a decimal number, or one
    /// that takes its meter's total out of range
    #[error("Invalid volume '{value}'")]
    InvalidVolume {
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// A `300` record appeared before any `200` record
    #[error("Volume record at line {line} has no preceding NMI header")]
    OrphanVolume { line: usize },

    /// A `300` record date is not a valid `YYYYMMDD` date
    #[error("Invalid reading date '{value}' (expected YYYYMMDD)")]
    InvalidDate { value: String },

    /// The first field of a line is not a known record type
    #[error("Unknown record type '{code}'")]
    UnknownRecordType { code: String },

    /// A record has fewer fields than its type requires
    #[error("Record type {record_type} needs {expected} fields, found {found}")]
    MalformedRecord {
        record_type: String,
        expected: usize,
        found: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a malformed stream error from the observed marker counts
    pub fn malformed_stream(start_markers: usize, end_markers: usize) -> Self {
        Self::MalformedStream {
            start_markers,
            end_markers,
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(nmi: impl Into<String>) -> Self {
        Self::InvalidIdentifier { nmi: nmi.into() }
    }

    /// Create an invalid unit error
    pub fn invalid_unit(code: impl Into<String>) -> Self {
        Self::InvalidUnit { code: code.into() }
    }

    /// Create an invalid quality error
    pub fn invalid_quality(code: impl Into<String>) -> Self {
        Self::InvalidQuality { code: code.into() }
    }

    /// Create an invalid volume error
    pub fn invalid_volume(value: impl Into<String>, source: rust_decimal::Error) -> Self {
        Self::InvalidVolume {
            value: value.into(),
            source,
        }
    }

    /// Create an orphan volume error for the given 1-based line number
    pub fn orphan_volume(line: usize) -> Self {
        Self::OrphanVolume { line }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create an unknown record type error
    pub fn unknown_record_type(code: impl Into<String>) -> Self {
        Self::UnknownRecordType { code: code.into() }
    }

    /// Create a malformed record error
    pub fn malformed_record(record_type: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::MalformedRecord {
            record_type: record_type.into(),
            expected,
            found,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error only skips one record instead of aborting the parse
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::UnknownRecordType { .. } | Self::MalformedRecord { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
