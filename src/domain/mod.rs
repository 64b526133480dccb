//! Domain layer - Core business logic and entities

pub mod error;
pub mod exoplanet;
pub mod tabular;

pub use error::DomainError;
pub use exoplanet::{
    BatchMode, BatchPrediction, BatchPredictions, BatchSummary, DerivedFeatures, FeatureRow,
    InputRecord, ModelInfo, PredictionResult, RowOutcome, Score, Scorer, UnknownFieldPolicy,
};
pub use tabular::{TabularFormat, TabularParser, TabularRow};
