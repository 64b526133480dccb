//! Application state shared across handlers

use std::sync::Arc;

use crate::infrastructure::services::PredictionService;

/// Shared, read-only state; the loaded model lives behind the prediction service
#[derive(Clone, Debug)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    /// Port the server listens on, reported by the health endpoint
    pub port: u16,
}

impl AppState {
    pub fn new(prediction_service: PredictionService, port: u16) -> Self {
        Self {
            prediction_service: Arc::new(prediction_service),
            port,
        }
    }
}
