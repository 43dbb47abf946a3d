//! JSON bodies exchanged with the diagnostic backend.
//!
//! Deserialization is strict about presence and type of the expected
//! fields; extra fields are tolerated.

use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

/// Expected success body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReply {
    pub answer: String,
}

/// Expected success body of `POST /upload_csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReply {
    pub status: String,
    pub message: String,
}

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";
