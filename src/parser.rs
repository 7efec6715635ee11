//! CSV text → [`Dataset`].
//!
//! The first record supplies the column keys; every following record becomes
//! a [`Row`] with cells typed by [`parse_cell`]. This pass only splits
//! numbers from strings; semantic column types come from
//! [`crate::schema::infer_schema`].

use std::{collections::HashSet, io::Read, path::Path};

use log::{debug, warn};

use crate::{
    data::{Dataset, Row, parse_cell},
    error::{ChartError, Result},
    io_utils,
};

pub fn parse<R: Read>(mut input: R) -> Result<Dataset> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    if let Some(line) = io_utils::unterminated_quote_line(&bytes) {
        return Err(ChartError::parse_failure(line, "unterminated quoted field"));
    }

    let mut reader = io_utils::open_csv_reader(bytes.as_slice());
    let headers = dedupe_headers(io_utils::reader_headers(&mut reader)?);
    if headers.is_empty() {
        return Err(ChartError::parse_failure(1, "missing header row"));
    }

    let mut rows = Vec::new();
    let mut record = csv::ByteRecord::new();
    let mut dropped = 0usize;
    while reader.read_byte_record(&mut record)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let decoded = io_utils::decode_record(&record, line)?;
        if decoded.len() > headers.len() {
            warn!(
                "Line {line} has {} field(s) but the header has {}; extra fields ignored",
                decoded.len(),
                headers.len()
            );
        }
        let row = Row::new(
            decoded
                .iter()
                .take(headers.len())
                .map(|cell| parse_cell(cell))
                .collect(),
        );
        if row.is_blank() {
            dropped += 1;
            continue;
        }
        rows.push(row);
    }

    let dataset = Dataset::new(headers, rows);
    debug!(
        "Parsed {} row(s) across {} column(s); dropped {dropped} blank row(s)",
        dataset.len(),
        dataset.headers().len()
    );
    Ok(dataset)
}

pub fn parse_str(input: &str) -> Result<Dataset> {
    parse(input.as_bytes())
}

pub fn parse_path(path: &Path) -> Result<Dataset> {
    let reader = std::fs::File::open(path)?;
    parse(std::io::BufReader::new(reader))
}

/// Repeated header names get a numeric suffix so every key stays distinct.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    headers
        .into_iter()
        .map(|header| {
            if seen.insert(header.clone()) {
                return header;
            }
            let mut suffix = 1usize;
            loop {
                let candidate = format!("{header}_{suffix}");
                if seen.insert(candidate.clone()) {
                    warn!("Duplicate column '{header}' renamed to '{candidate}'");
                    return candidate;
                }
                suffix += 1;
            }
        })
        .collect()
}
