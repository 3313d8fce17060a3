//! Test utilities for NEM12 parser testing
//!
//! This module provides the sample files and helper functions used across
//! the parser test modules.

use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

use crate::app::models::MeterRead;


/// Well formed file with two NMI blocks
///
/// 6123456789 totals -36.84 over seven days, 6987654321 totals 14.33.
pub const SIMPLE_NEM12: &str = "100
200,6123456789,E1
300,20161113,-50.8,A
300,20161114,-25.3,A
300,20161115,-21,A
300,20161116,-44.23,A
300,20161117,-13.4,A
300,20161118,20.1,A
300,20161119,97.79,A
200,6987654321,E1
300,20161113,-8.8,E
300,20161114,7.2,A
300,20161115,15.93,A
900";

/// Split sample content into owned lines
pub fn lines(content: &str) -> Vec<String> {
    content.lines().map(|s| s.to_string()).collect()
}

/// Sample file with one line replaced
pub fn simple_nem12_with(line_index: usize, replacement: &str) -> Vec<String> {
    let mut result = lines(SIMPLE_NEM12);
    result[line_index] = replacement.to_string();
    result
}

/// Sample file with one line removed
pub fn simple_nem12_without(line_index: usize) -> Vec<String> {
    let mut result = lines(SIMPLE_NEM12);
    result.remove(line_index);
    result
}

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Find the meter read for `nmi`, panicking if it is absent
pub fn find_read<'a>(reads: &'a [MeterRead], nmi: &str) -> &'a MeterRead {
    reads
        .iter()
        .find(|read| read.nmi() == nmi)
        .unwrap_or_else(|| panic!("no meter read for NMI {}", nmi))
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
