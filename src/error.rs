//! Library error type.
//!
//! Every fallible pipeline operation returns [`ChartError`]. The CLI layer
//! wraps these in `anyhow` with context; library callers can match on the
//! variants to decide between an inline message (upload gate) and a blocking
//! alert (parse failure).

use thiserror::Error;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("'{name}' is not a CSV file; please upload a CSV file")]
    InvalidFileType { name: String },
    #[error("No file was provided")]
    NoFile,
    #[error("Expected exactly one file, got {count}")]
    TooManyFiles { count: usize },
    #[error("Failed to parse CSV at line {line}: {message}")]
    ParseFailure { line: u64, message: String },
    #[error("Column '{key}' does not exist in the dataset")]
    UnknownColumn { key: String },
    #[error("No dataset has been loaded")]
    NoDataset,
    #[error("Exporting charts is not supported")]
    ExportUnsupported,
    #[error("Invalid chart configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn parse_failure(line: u64, message: impl Into<String>) -> Self {
        ChartError::ParseFailure {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_column(key: &str) -> Self {
        ChartError::UnknownColumn {
            key: key.to_string(),
        }
    }

    /// Upload gate and parse errors leave the previous session state in place
    /// and need a fresh upload from the user.
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            ChartError::InvalidFileType { .. }
                | ChartError::NoFile
                | ChartError::TooManyFiles { .. }
                | ChartError::ParseFailure { .. }
        )
    }
}

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line()).unwrap_or_default();
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ChartError::Io(io),
            _ => ChartError::parse_failure(line, message),
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ChartError {
    fn from(err: serde_yaml::Error) -> Self {
        ChartError::Config(err.to_string())
    }
}
