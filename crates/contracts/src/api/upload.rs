//! `POST /upload` response contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend-parsed form of an uploaded file.
///
/// The backend guarantees a `type` tag (`"structured"` for CSV/JSON,
/// `"unstructured"` for PDF/TXT); everything else is backend-defined and is
/// carried opaquely so it can be echoed back on `/ask` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRepresentation {
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

/// Successful `/upload` response body.
///
/// The backend also sends a `filename` sibling next to `data`; the client
/// has no use for it and serde skips it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub data: FileRepresentation,
}
