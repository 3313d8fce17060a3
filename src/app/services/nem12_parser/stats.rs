//! Parsing statistics and result structures for NEM12 processing
//!
//! This module provides types for tracking what a parse saw and skipped, and
//! for returning the parsed meter reads together with those statistics.

use crate::app::models::MeterRead;

/// Parsing result with meter reads and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One meter read per NMI, in first-seen order
    pub meter_reads: Vec<MeterRead>,

    /// Parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines consumed
    pub total_lines: usize,

    /// Number of `100` records
    pub start_markers: usize,

    /// Number of `900` records
    pub end_markers: usize,

    /// Number of `200` records accepted
    pub nmi_blocks: usize,

    /// Number of `300` records accepted
    pub volumes_parsed: usize,

    /// Number of accepted volumes that replaced an earlier volume for the same date
    pub volumes_replaced: usize,

    /// Number of lines skipped due to recoverable errors
    pub records_skipped: usize,

    /// Recoverable error messages, capped by the parser configuration
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a skipped line and keep its message while under `max_errors`
    pub fn record_skip(
        &mut self,
        line_number: usize,
        message: impl std::fmt::Display,
        max_errors: usize,
    ) {
        self.records_skipped += 1;
        if self.errors.len() < max_errors {
            self.errors.push(format!("Line {}: {}", line_number, message));
        }
    }

    /// Percentage of lines that were not skipped
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            ((self.total_lines - self.records_skipped) as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// True when no line was skipped
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0
    }
}
