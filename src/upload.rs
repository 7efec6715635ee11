//! Upload gate: accepts exactly one CSV file per action before any parsing.

use std::path::Path;

use log::debug;

use crate::error::{ChartError, Result};

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_EXTENSION: &str = "csv";

/// A file handed over by the host (drag-drop, file picker, command line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            content: content.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn is_csv(&self) -> bool {
        self.mime_type.as_deref() == Some(CSV_MIME_TYPE) || has_csv_extension(&self.name)
    }
}

pub fn has_csv_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

/// Picks the single file of an upload action and checks that it is CSV.
pub fn select_upload(mut files: Vec<UploadedFile>) -> Result<UploadedFile> {
    match files.len() {
        0 => Err(ChartError::NoFile),
        1 => {
            let file = files.remove(0);
            validate_upload(&file)?;
            Ok(file)
        }
        count => Err(ChartError::TooManyFiles { count }),
    }
}

pub fn validate_upload(file: &UploadedFile) -> Result<()> {
    if file.is_csv() {
        debug!("Accepted upload '{}' ({} bytes)", file.name, file.content.len());
        Ok(())
    } else {
        Err(ChartError::InvalidFileType {
            name: file.name.clone(),
        })
    }
}
