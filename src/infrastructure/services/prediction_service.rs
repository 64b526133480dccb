//! Prediction service - validation, feature derivation and scoring

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::tabular::TabularRow;
use crate::domain::{
    BatchMode, BatchPrediction, DerivedFeatures, DomainError, FeatureRow, InputRecord, ModelInfo,
    PredictionResult, RowOutcome, Scorer, UnknownFieldPolicy,
};
use crate::infrastructure::observability::{record_batch, record_prediction, record_prediction_error};
use crate::infrastructure::tabular::TabularParserFactory;

/// Orchestrates the inference pipeline over a shared, read-only scorer
#[derive(Clone)]
pub struct PredictionService {
    scorer: Arc<dyn Scorer>,
    unknown_fields: UnknownFieldPolicy,
}

impl PredictionService {
    /// Create a new PredictionService around a loaded scorer
    pub fn new(scorer: Arc<dyn Scorer>, unknown_fields: UnknownFieldPolicy) -> Self {
        Self {
            scorer,
            unknown_fields,
        }
    }

    /// Describe the loaded model
    pub fn model_info(&self) -> ModelInfo {
        self.scorer.info()
    }

    /// Validate loosely typed fields into a record, applying the unknown field policy
    pub fn validate(&self, fields: &Map<String, Value>) -> Result<InputRecord, DomainError> {
        InputRecord::from_fields(fields, self.unknown_fields)
    }

    /// Classify a validated record
    pub fn predict(&self, record: &InputRecord) -> Result<PredictionResult, DomainError> {
        debug!(ra = ?record.ra, dec = ?record.dec, "Processing exoplanet record");

        let derived = DerivedFeatures::derive(record)?;
        let row = FeatureRow::merge(record, &derived);
        let score = self.scorer.score(&row)?;

        debug!(
            predicted_class = %score.label,
            class_index = score.class_index,
            confidence = score.confidence,
            "Exoplanet record classified"
        );

        Ok(PredictionResult::new(score.label, score.confidence, derived))
    }

    /// Validate and classify a single JSON object
    pub fn predict_fields(&self, fields: &Map<String, Value>) -> Result<PredictionResult, DomainError> {
        let result = self.validate(fields).and_then(|record| self.predict(&record));

        match &result {
            Ok(prediction) => record_prediction("single", &prediction.predicted_class),
            Err(e) => record_prediction_error("single", e.kind()),
        }

        result
    }

    /// Parse an uploaded table and classify every row, preserving row order
    pub fn predict_batch(
        &self,
        filename: &str,
        content: &[u8],
        mode: BatchMode,
    ) -> Result<BatchPrediction, DomainError> {
        let start = Instant::now();

        let result = TabularParserFactory::parse_upload(filename, content)
            .and_then(|rows| self.predict_rows(rows, mode));

        match &result {
            Ok(batch) => {
                record_batch(mode.as_str(), batch.len(), start.elapsed());
                info!(
                    filename = %filename,
                    mode = mode.as_str(),
                    rows = batch.summary.total,
                    failed = batch.summary.failed,
                    duration_ms = %start.elapsed().as_millis(),
                    "Batch classified"
                );
            }
            Err(e) => {
                record_prediction_error(mode.as_str(), e.kind());
                warn!(filename = %filename, mode = mode.as_str(), error = %e, "Batch rejected");
            }
        }

        result
    }

    /// Classify already parsed rows
    pub fn predict_rows(
        &self,
        rows: Vec<TabularRow>,
        mode: BatchMode,
    ) -> Result<BatchPrediction, DomainError> {
        if rows.is_empty() {
            return Err(DomainError::empty_input("Uploaded file contains no data rows"));
        }

        match mode {
            BatchMode::AllOrNothing => {
                let predictions = rows
                    .iter()
                    .map(|row| {
                        self.predict_row(row)
                            .map(|prediction| (row.number, prediction))
                            .map_err(|e| with_row_context(row.number, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                for (_, prediction) in &predictions {
                    record_prediction(mode.as_str(), &prediction.predicted_class);
                }

                Ok(BatchPrediction::complete(predictions))
            }
            BatchMode::PerRow => {
                let mut outcomes = Vec::with_capacity(rows.len());

                for row in &rows {
                    let row_number = row.number;

                    match self.predict_row(row) {
                        Ok(prediction) => {
                            record_prediction(mode.as_str(), &prediction.predicted_class);
                            outcomes.push(RowOutcome::Ok {
                                row: row_number,
                                prediction,
                            });
                        }
                        Err(e) if e.is_client_error() => {
                            record_prediction_error(mode.as_str(), e.kind());
                            outcomes.push(RowOutcome::Error {
                                row: row_number,
                                error: e.to_string(),
                            });
                        }
                        Err(e) => return Err(e),
                    }
                }

                Ok(BatchPrediction::per_row(outcomes))
            }
        }
    }

    fn predict_row(&self, row: &TabularRow) -> Result<PredictionResult, DomainError> {
        let record = self.validate(&row.fields)?;
        self.predict(&record)
    }
}

/// Prefix client errors with the failing row number; server errors pass through
fn with_row_context(row: usize, error: DomainError) -> DomainError {
    if error.is_client_error() {
        DomainError::validation(format!("Row {}: {}", row, error))
    } else {
        error
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("unknown_fields", &self.unknown_fields)
            .finish_non_exhaustive()
    }
}
