//! Simplified NEM12 parser
//!
//! This module turns a stream of NEM12 record lines into [`MeterRead`]
//! aggregates, one per NMI, in the order each NMI first appears.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Entry points and per-call parse context
//! - [`record_parser`] - Line splitting and record type classification
//! - [`boundary`] - Start/end marker counting
//! - [`aggregate_builder`] - Grouping volumes under the current NMI block
//! - [`field_parsers`] - NMI, unit, date, volume and quality field validation
//! - [`reader`] - Reading lines from files and buffered readers
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Error policy
//!
//! A bad date, an unknown record type or a record with too few fields skips
//! that one line. Every other problem aborts the parse and nothing partial is
//! returned.
//!
//! ## Usage
//!
//! ```rust
//! use nem12_parser::Nem12Parser;
//!
//! let parser = Nem12Parser::new();
//! let result = parser.parse_with_stats(["100", "200,6123456789,KWH", "300,20161113,-50.8,A", "900"])?;
//!
//! println!("Parsed {} volumes from {} lines",
//!          result.stats.volumes_parsed,
//!          result.stats.total_lines);
//! # Ok::<(), nem12_parser::Error>(())
//! ```
//!
//! [`MeterRead`]: crate::app::models::MeterRead

pub mod aggregate_builder;
pub mod boundary;
pub mod field_parsers;
pub mod parser;
pub mod reader;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregate_builder::AggregateBuilder;
pub use boundary::BoundaryTracker;
pub use parser::Nem12Parser;
pub use record_parser::{RawRecord, RecordType};
pub use stats::{ParseResult, ParseStats};
