//! Tabular upload handler

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
        Multipart, Query, State,
    },
    http::StatusCode,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ResponseEnvelope};
use crate::domain::{BatchMode, BatchPredictions, DomainError, TabularFormat};

use super::SUCCESS_MESSAGE;

/// Name of the multipart field carrying the table
const FILE_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub mode: BatchMode,
}

/// POST {prefix}/exoplanet/upload
pub async fn upload_exoplanets(
    State(state): State<AppState>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResponseEnvelope<BatchPredictions>>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::unprocessable(format!("Invalid query: {}", e.body_text())).with_param("mode")
    })?;
    let mut multipart = multipart
        .map_err(|e| ApiError::unprocessable(format!("Invalid upload: {}", e.body_text())))?;

    let (filename, content) = read_file_field(&mut multipart).await?;
    let mode = query.mode;

    info!(
        filename = %filename,
        bytes = content.len(),
        mode = mode.as_str(),
        "Received exoplanet upload"
    );

    let service = state.prediction_service.clone();
    let batch = tokio::task::spawn_blocking(move || {
        service.predict_batch(&filename, &content, mode)
    })
    .await
    .map_err(|e| DomainError::internal(format!("Batch task failed: {}", e)))??;

    Ok(Json(ResponseEnvelope::batch(SUCCESS_MESSAGE, batch)))
}

/// Find the `file` field, rejecting unsupported extensions before the body is read
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().map(str::to_string).ok_or_else(|| {
            ApiError::unprocessable("Uploaded file has no filename").with_param(FILE_FIELD)
        })?;

        TabularFormat::from_filename(&filename)?;

        let content = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, content));
    }

    Err(ApiError::unprocessable("No file provided").with_param(FILE_FIELD))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Uploaded file exceeds the size limit")
    } else {
        ApiError::unprocessable(format!("Invalid multipart body: {}", err.body_text()))
    }
}
