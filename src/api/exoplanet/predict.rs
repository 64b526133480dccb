//! Single-record classification handler

use axum::extract::State;
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ResponseEnvelope};
use crate::domain::PredictionResult;

use super::SUCCESS_MESSAGE;

/// POST {prefix}/exoplanet
pub async fn predict_exoplanet(
    State(state): State<AppState>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<ResponseEnvelope<PredictionResult>>, ApiError> {
    debug!(fields = fields.len(), "Classifying single exoplanet record");

    let prediction = state.prediction_service.predict_fields(&fields)?;

    Ok(Json(ResponseEnvelope::success(SUCCESS_MESSAGE, prediction)))
}
