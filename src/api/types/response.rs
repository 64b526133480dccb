//! Success envelope shared by the classification endpoints

use serde::{Deserialize, Serialize};

use crate::domain::{BatchPrediction, BatchPredictions, BatchSummary};

/// `{"success": true, "message": ..., "data": ...}`
///
/// Batch responses also carry a top-level `summary` next to the row list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<BatchSummary>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            summary: None,
        }
    }
}

impl ResponseEnvelope<BatchPredictions> {
    /// Row list as `data`, counts as `summary`
    pub fn batch(message: impl Into<String>, batch: BatchPrediction) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(batch.predictions),
            summary: Some(batch.summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DerivedFeatures, PredictionResult, RowOutcome};

    fn features() -> DerivedFeatures {
        DerivedFeatures {
            planet_to_star_ratio: 1.0,
            duration_to_period: 0.1,
            depth_to_radius: 100.0,
            insolation_eff_ratio: 0.001,
            eqt_to_insol: 1152.0,
            tran_snr_proxy: 100.0,
        }
    }

    #[test]
    fn test_success_envelope() {
        let envelope = ResponseEnvelope::success("ok", vec![1, 2]);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"][1], 2);
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_batch_envelope_puts_rows_in_data() {
        let batch = BatchPrediction::complete(vec![
            (1, PredictionResult::new("CONFIRMED", 0.9, features())),
            (2, PredictionResult::new("CANDIDATE", 0.55, features())),
        ]);

        let json = serde_json::to_value(ResponseEnvelope::batch("ok", batch)).unwrap();

        assert!(json["data"].is_array());
        assert_eq!(json["data"][0]["predicted_class"], "CONFIRMED");
        assert_eq!(json["data"][1]["predicted_proba"], 0.55);
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["class_distribution"]["CANDIDATE"], 1);
    }

    #[test]
    fn test_per_row_envelope_rows_carry_predicted_class() {
        let batch = BatchPrediction::per_row(vec![
            RowOutcome::Ok {
                row: 1,
                prediction: PredictionResult::new("CONFIRMED", 0.9, features()),
            },
            RowOutcome::Error {
                row: 2,
                error: "Missing or invalid field 'st_rad': value is required".to_string(),
            },
        ]);

        let json = serde_json::to_value(ResponseEnvelope::batch("ok", batch)).unwrap();

        assert_eq!(json["data"][0]["status"], "ok");
        assert_eq!(json["data"][0]["predicted_class"], "CONFIRMED");
        assert_eq!(json["data"][1]["status"], "error");
        assert_eq!(json["summary"]["failed"], 1);
    }
}
