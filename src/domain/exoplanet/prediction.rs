//! Prediction results and batch outcomes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::features::DerivedFeatures;

/// Classification of a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    /// Maximum class probability, rounded to 2 decimal places
    #[serde(rename = "predicted_proba", alias = "confidence")]
    pub confidence: f64,
    pub derived_features: DerivedFeatures,
}

impl PredictionResult {
    pub fn new(
        predicted_class: impl Into<String>,
        confidence: f64,
        derived_features: DerivedFeatures,
    ) -> Self {
        Self {
            predicted_class: predicted_class.into(),
            confidence: round_confidence(confidence),
            derived_features,
        }
    }
}

fn round_confidence(confidence: f64) -> f64 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// How a batch reacts to a failing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// The first invalid row fails the whole batch
    #[default]
    AllOrNothing,
    /// Every row gets its own outcome
    PerRow,
}

impl BatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOrNothing => "all_or_nothing",
            Self::PerRow => "per_row",
        }
    }
}

/// Outcome for one data row (rows numbered from 1, header excluded).
/// Successful rows carry the prediction fields inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Ok {
        row: usize,
        #[serde(flatten)]
        prediction: PredictionResult,
    },
    Error {
        row: usize,
        error: String,
    },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            Self::Ok { row, .. } | Self::Error { row, .. } => *row,
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Self::Ok { prediction, .. } => Some(prediction),
            Self::Error { .. } => None,
        }
    }
}

/// Aggregate counts for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub class_distribution: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut class_distribution = BTreeMap::new();

        for prediction in outcomes.iter().filter_map(RowOutcome::prediction) {
            *class_distribution
                .entry(prediction.predicted_class.clone())
                .or_insert(0) += 1;
        }

        let succeeded: usize = class_distribution.values().sum();

        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            class_distribution,
        }
    }
}

/// Result of scoring an uploaded table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchPredictions {
    /// All-or-nothing mode: one prediction per row, in row order
    Complete(Vec<PredictionResult>),
    /// Per-row mode: one outcome per row, in row order
    PerRow(Vec<RowOutcome>),
}

/// Scored table: the row list goes out as `data`, the summary next to it
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPrediction {
    pub predictions: BatchPredictions,
    pub summary: BatchSummary,
}

impl BatchPrediction {
    /// Build from `(row number, prediction)` pairs in row order
    pub fn complete(rows: Vec<(usize, PredictionResult)>) -> Self {
        let outcomes: Vec<RowOutcome> = rows
            .iter()
            .map(|(row, prediction)| RowOutcome::Ok {
                row: *row,
                prediction: prediction.clone(),
            })
            .collect();

        Self {
            summary: BatchSummary::from_outcomes(&outcomes),
            predictions: BatchPredictions::Complete(
                rows.into_iter().map(|(_, prediction)| prediction).collect(),
            ),
        }
    }

    pub fn per_row(outcomes: Vec<RowOutcome>) -> Self {
        Self {
            summary: BatchSummary::from_outcomes(&outcomes),
            predictions: BatchPredictions::PerRow(outcomes),
        }
    }

    pub fn len(&self) -> usize {
        self.summary.total
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total == 0
    }
}
