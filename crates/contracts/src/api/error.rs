//! Error envelope both endpoints use for non-2xx responses.

use serde::Deserialize;

/// Body of a failed request: `{"detail": "..."}`.
///
/// `detail` is optional; callers fall back to the HTTP status text when it
/// is absent or the body is not JSON at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
