//! Request/response bodies for the two backend endpoints.

pub mod ask;
pub mod error;
pub mod upload;

pub use ask::{AskRequest, AskResponse};
pub use error::ErrorBody;
pub use upload::{FileRepresentation, UploadResponse};
