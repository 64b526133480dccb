//! Model description handler

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ResponseEnvelope};
use crate::domain::ModelInfo;

/// GET {prefix}/exoplanet/model
pub async fn get_model_info(
    State(state): State<AppState>,
) -> Result<Json<ResponseEnvelope<ModelInfo>>, ApiError> {
    let info = state.prediction_service.model_info();

    Ok(Json(ResponseEnvelope::success("Model loaded", info)))
}
