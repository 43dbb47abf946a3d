//! Request inputs for the two workflows.

use serde::{Deserialize, Serialize};

/// The media type that marks a file as CSV regardless of its name.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A validated free-text diagnostic query.
///
/// `text` is kept exactly as typed; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

/// A file offered by the picker or a drop, before or after validation.
///
/// Only values accepted by the upload validator are ever staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    /// File name as reported by the picker, e.g. `vitals.csv`.
    pub name: String,
    /// Size in bytes.
    pub byte_size: u64,
    /// Declared media type, if the source reported one.
    pub media_type: Option<String>,
    /// Raw file contents sent as the multipart body.
    pub contents: Vec<u8>,
}

impl UploadCandidate {
    /// Build a candidate from in-memory contents; `byte_size` is derived.
    pub fn new(
        name: impl Into<String>,
        media_type: Option<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        let contents = contents.into();
        Self {
            name: name.into(),
            byte_size: contents.len() as u64,
            media_type,
            contents,
        }
    }

    /// Size in KiB with two decimals, the way the drop zone shows it.
    pub fn size_kib(&self) -> String {
        format!("{:.2} KB", self.byte_size as f64 / 1024.0)
    }
}
