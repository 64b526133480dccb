//! Exoplanet Classifier
//!
//! HTTP inference service that classifies transit candidates as
//! CONFIRMED, CANDIDATE or FALSE POSITIVE using a pre-trained model:
//! - JSON single-record and CSV/Excel batch classification
//! - Derived transit features computed before scoring
//! - Structured logging, OpenTelemetry tracing and Prometheus metrics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;

use api::AppState;
use infrastructure::model::ArtifactScorer;
use infrastructure::services::PredictionService;

/// Load the model artifact and build the prediction service
pub fn create_prediction_service(config: &AppConfig) -> anyhow::Result<PredictionService> {
    let scorer = ArtifactScorer::load(&config.model.artifact_path, &config.model.label_encoder_path)
        .with_context(|| {
            format!(
                "Failed to load model from '{}' and '{}'",
                config.model.artifact_path, config.model.label_encoder_path
            )
        })?;

    Ok(PredictionService::new(
        Arc::new(scorer),
        config.validation.unknown_fields,
    ))
}

/// Create the application state with all services initialized
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_prediction_service(config)?;

    Ok(AppState::new(service, config.server.port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shipped_model_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.model.artifact_path =
            concat!(env!("CARGO_MANIFEST_DIR"), "/models/demo_model.json").to_string();
        config.model.label_encoder_path =
            concat!(env!("CARGO_MANIFEST_DIR"), "/models/label_encoder.json").to_string();
        config
    }

    #[test]
    fn test_shipped_model_classifies_earth_like_record() {
        let service = create_prediction_service(&shipped_model_config()).unwrap();

        let fields = json!({
            "pl_rade": 1.0,
            "st_rad": 1.0,
            "pl_trandurh": 1.0,
            "pl_orbper": 365.0,
            "pl_trandep": 100.0,
            "pl_trandeperr1": 1.0,
            "pl_insol": 1.0,
            "st_teff": 5778.0,
            "pl_eqt": 288.0
        });
        let result = service
            .predict_fields(fields.as_object().unwrap())
            .unwrap();

        let classes = service.model_info().classes;
        assert!(classes.contains(&result.predicted_class));
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn test_default_model_is_flagged_demo() {
        let mut config = shipped_model_config();
        assert!(config.model.artifact_path.ends_with(&AppConfig::default().model.artifact_path));

        let service = create_prediction_service(&config).unwrap();
        assert!(service.model_info().demo);

        config.model.artifact_path = "models/missing.json".to_string();
        assert!(create_prediction_service(&config).is_err());
    }

    #[test]
    fn test_overflowing_record_is_a_client_error() {
        let service = create_prediction_service(&shipped_model_config()).unwrap();

        let fields = json!({
            "pl_rade": 1.0,
            "st_rad": 1.0,
            "pl_trandurh": 1.7e308,
            "pl_orbper": 1.0,
            "pl_trandep": 100.0,
            "pl_trandeperr1": 1.0,
            "pl_insol": 1.0,
            "st_teff": 5778.0,
            "pl_eqt": 288.0
        });
        let err = service
            .predict_fields(fields.as_object().unwrap())
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Missing or invalid field 'duration_to_period': value out of range for the model"
        );
    }

    #[test]
    fn test_missing_artifact_fails_startup() {
        let mut config = AppConfig::default();
        config.model.artifact_path = "does/not/exist.json".to_string();

        let err = create_app_state_with_config(&config).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
