//! API request/response types

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use response::ResponseEnvelope;
