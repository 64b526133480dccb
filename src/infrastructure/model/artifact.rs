//! Portable model artifact: imputation, standard scaling and a linear
//! classifier per class, exported from the training pipeline as JSON.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FeatureRow, InputRecord};

/// Supported artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Multinomial (or binary) logistic regression
    SoftmaxLinear,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoftmaxLinear => "softmax_linear",
        }
    }
}

/// Per-feature standardisation: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Deserialized model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub kind: ArtifactKind,
    /// Set on artifacts with hand-set weights that only exercise the pipeline
    #[serde(default)]
    pub demo: bool,
    /// Model input order; empty means the record schema order
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Fill values for absent features
    #[serde(default)]
    pub impute: HashMap<String, f64>,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    /// One row per class, or a single row for a binary model
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl ModelArtifact {
    /// Load and validate an artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read model artifact '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        let mut artifact: ModelArtifact = serde_json::from_str(content)
            .map_err(|e| DomainError::configuration(format!("Invalid model artifact: {}", e)))?;

        if artifact.feature_names.is_empty() {
            artifact.feature_names = InputRecord::FIELD_NAMES
                .iter()
                .map(|n| n.to_string())
                .collect();
        }

        artifact.validate()?;
        Ok(artifact)
    }

    /// Number of classes the artifact can score
    pub fn class_count(&self) -> usize {
        if self.coefficients.len() == 1 {
            2
        } else {
            self.coefficients.len()
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        let width = self.feature_names.len();

        if let Some(unknown) = self
            .feature_names
            .iter()
            .find(|n| !InputRecord::is_known_field(n))
        {
            return Err(DomainError::configuration(format!(
                "Model expects feature '{}' which is not part of the record schema",
                unknown
            )));
        }

        if self.coefficients.is_empty() {
            return Err(DomainError::configuration("Model has no coefficients"));
        }

        if let Some(row) = self.coefficients.iter().find(|row| row.len() != width) {
            return Err(DomainError::configuration(format!(
                "Coefficient row has {} weights but the model has {} features",
                row.len(),
                width
            )));
        }

        if self.intercepts.len() != self.coefficients.len() {
            return Err(DomainError::configuration(format!(
                "Model has {} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != width || scaler.scale.len() != width {
                return Err(DomainError::configuration(format!(
                    "Scaler shape ({}, {}) does not match {} features",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    width
                )));
            }
        }

        Ok(())
    }

    /// Build the model input vector from a feature row
    pub fn input_vector(&self, row: &FeatureRow) -> Result<Vec<f64>, DomainError> {
        self.feature_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let raw = row
                    .get(name)
                    .or_else(|| self.impute.get(name).copied())
                    .ok_or_else(|| {
                        DomainError::missing_or_invalid(
                            name.as_str(),
                            "value is required by the model",
                        )
                    })?;

                let value = match &self.scaler {
                    Some(scaler) => {
                        // Zero-variance features keep their centred value
                        let scale = if scaler.scale[i] == 0.0 { 1.0 } else { scaler.scale[i] };
                        (raw - scaler.mean[i]) / scale
                    }
                    None => raw,
                };

                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(out_of_range(name))
                }
            })
            .collect()
    }

    /// Class probabilities for a feature row
    pub fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, DomainError> {
        let x = self.input_vector(row)?;

        let logits: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, intercept)| {
                intercept + weights.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>()
            })
            .collect();

        if logits.iter().any(|z| !z.is_finite()) {
            return Err(out_of_range(self.dominant_feature(&x)));
        }

        let probabilities = if logits.len() == 1 {
            let positive = sigmoid(logits[0]);
            vec![1.0 - positive, positive]
        } else {
            softmax(&logits)
        };

        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(DomainError::model("Model produced non-finite probabilities"));
        }

        Ok(probabilities)
    }

    /// Feature with the largest magnitude in the model input
    fn dominant_feature(&self, x: &[f64]) -> &str {
        x.iter()
            .zip(&self.feature_names)
            .fold((0.0_f64, None), |(best, name), (v, n)| {
                if v.abs() > best {
                    (v.abs(), Some(n.as_str()))
                } else {
                    (best, name)
                }
            })
            .1
            .unwrap_or("record")
    }
}

fn out_of_range(field: &str) -> DomainError {
    DomainError::missing_or_invalid(field, "value out of range for the model")
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let total: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / total).collect()
}
