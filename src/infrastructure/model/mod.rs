//! Model artifact loading and scoring

mod artifact;
mod label_encoder;
mod scorer;

pub use artifact::{ArtifactKind, ModelArtifact, StandardScaler};
pub use label_encoder::LabelEncoder;
pub use scorer::ArtifactScorer;
