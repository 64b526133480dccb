//! Exoplanet classification domain
//!
//! Record schema, derived features, the scoring seam and prediction results.

mod features;
mod prediction;
mod record;
mod scorer;

pub use features::{DerivedFeatures, FeatureRow};
pub use prediction::{
    BatchMode, BatchPrediction, BatchPredictions, BatchSummary, PredictionResult, RowOutcome,
};
pub use record::{InputRecord, UnknownFieldPolicy};
pub use scorer::{ModelInfo, Score, Scorer};

#[cfg(test)]
pub use scorer::MockScorer;
