//! Infrastructure layer - Model loading, file parsing and observability

pub mod logging;
pub mod model;
pub mod observability;
pub mod services;
pub mod tabular;
