//! Exoplanet classification endpoints

pub mod model;
pub mod predict;
pub mod upload;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Message returned with every successful classification
pub const SUCCESS_MESSAGE: &str = "Exoplanet data processed successfully";

/// Create the classification router, mounted under the configured prefix
pub fn create_exoplanet_router() -> Router<AppState> {
    Router::new()
        .route("/exoplanet", post(predict::predict_exoplanet))
        .route("/exoplanet/", post(predict::predict_exoplanet))
        .route("/exoplanet/upload", post(upload::upload_exoplanets))
        .route("/exoplanet/model", get(model::get_model_info))
}
