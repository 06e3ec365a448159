//! Course Enrollment Shared Library
//!
//! Types shared between the backend and any API client: roles, grades,
//! request/response bodies and field validation.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Grade, Role};
pub use types::*;
