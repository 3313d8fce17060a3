//! Line reading for NEM12 files
//!
//! All I/O happens here, before any parsing starts, so a read failure is
//! reported as [`Error::Io`] and never as a parse error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

const UTF8_BOM: char = '\u{feff}';

/// Read every line from a buffered reader
///
/// Line terminators (`\n` or `\r\n`) are removed, as is a leading byte order mark.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let mut line =
            line.map_err(|e| Error::io(format!("Failed to read line {}", index + 1), e))?;
        if index == 0 && line.starts_with(UTF8_BOM) {
            line.remove(0);
        }
        lines.push(line);
    }

    Ok(lines)
}

/// Read every line of the file at `path`
pub fn read_file_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open file {}", path.display()), e))?;

    let lines = read_lines(BufReader::new(file)).map_err(|e| match e {
        Error::Io { message, source } => Error::io(
            format!("Failed to read file {}: {}", path.display(), message),
            source,
        ),
        other => other,
    })?;

    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
