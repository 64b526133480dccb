//! Scoring trait that isolates the model artifact

use serde::{Deserialize, Serialize};

use super::features::FeatureRow;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Output of scoring a single feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Decoded class label
    pub label: String,
    /// Index of the winning class
    pub class_index: usize,
    /// Probability of the winning class
    pub confidence: f64,
}

impl Score {
    pub fn new(label: impl Into<String>, class_index: usize, confidence: f64) -> Self {
        Self {
            label: label.into(),
            class_index,
            confidence,
        }
    }
}

/// Description of the loaded model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub kind: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    /// Hand-set demo weights rather than a trained export
    #[serde(default)]
    pub demo: bool,
}

/// A trained classifier over merged feature rows.
///
/// Implementations are constructed once at startup and shared read-only
/// between requests.
#[cfg_attr(test, automock)]
pub trait Scorer: Send + Sync {
    /// Score a row, returning the arg-max class and its probability
    fn score(&self, row: &FeatureRow) -> Result<Score, DomainError>;

    /// Describe the model's feature contract and label set
    fn info(&self) -> ModelInfo;
}
