//! I/O utilities for CSV reading, text decoding, and config file persistence.
//!
//! - **Reader construction**: `open_csv_reader` configures the `csv` crate for
//!   comma-separated input with double-quote escaping. Records may be ragged;
//!   the parser pads or trims them to the header width.
//! - **Decoding**: fields are read as bytes and decoded as strict UTF-8 via
//!   `encoding_rs`, so invalid input surfaces as a parse failure rather than
//!   replacement characters.
//! - **Config files**: chart configs are stored as JSON or YAML, picked by the
//!   file extension.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use encoding_rs::UTF_8;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ChartError, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
const UTF8_BOM: char = '\u{feff}';
const UTF8_BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

pub fn open_csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(DEFAULT_CSV_DELIMITER)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn decode_bytes(bytes: &[u8], line: u64) -> Result<String> {
    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        Err(ChartError::parse_failure(line, "input is not valid UTF-8"))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, line: u64) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, line))
        .collect()
}

/// Returns the line on which a quoted field opens without ever closing.
///
/// The `csv` reader accepts such input and swallows the rest of the file into
/// one field, so the quote state is tracked here the same way it reads it: a
/// quote opens a field only at the start of that field, and `""` inside a
/// quoted field is an escaped quote.
pub fn unterminated_quote_line(bytes: &[u8]) -> Option<u64> {
    let bytes = bytes.strip_prefix(UTF8_BOM_BYTES).unwrap_or(bytes);
    let mut line = 1u64;
    let mut opened_at = None;
    let mut field_start = true;
    let mut iter = bytes.iter().peekable();
    while let Some(&byte) = iter.next() {
        match (opened_at, byte) {
            (Some(_), b'"') => {
                if iter.peek() == Some(&&b'"') {
                    iter.next();
                } else {
                    opened_at = None;
                }
            }
            (None, b'"') if field_start => {
                opened_at = Some(line);
                field_start = false;
            }
            (None, DEFAULT_CSV_DELIMITER | b'\n' | b'\r') => field_start = true,
            (None, _) => field_start = false,
            _ => {}
        }
        if byte == b'\n' {
            line += 1;
        }
    }
    opened_at
}

/// Decodes the header record, removing a leading byte-order mark.
pub fn reader_headers<R>(reader: &mut csv::Reader<R>) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    let mut decoded = decode_record(&headers, 1)?;
    if let Some(first) = decoded.first_mut()
        && first.starts_with(UTF8_BOM)
    {
        *first = first.trim_start_matches(UTF8_BOM).to_string();
    }
    Ok(decoded)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

pub fn write_config_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match ConfigFormat::for_path(path) {
        ConfigFormat::Json => serde_json::to_writer_pretty(&mut writer, value)?,
        ConfigFormat::Yaml => serde_yaml::to_writer(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    let value = match ConfigFormat::for_path(path) {
        ConfigFormat::Json => serde_json::from_reader(reader)?,
        ConfigFormat::Yaml => serde_yaml::from_reader(reader)?,
    };
    Ok(value)
}
