//! Wire contracts shared between the frontend and the inference backend.
//!
//! The backend is an external service; these DTOs mirror its HTTP bodies
//! exactly and must stay compatible with it.

pub mod api;
