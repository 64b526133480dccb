//! `Scorer` backed by a loaded model artifact and label encoder

use std::path::Path;

use tracing::{info, warn};

use super::artifact::ModelArtifact;
use super::label_encoder::LabelEncoder;
use crate::domain::{DomainError, FeatureRow, ModelInfo, Score, Scorer};

/// Scores feature rows with a [`ModelArtifact`] and decodes the result
#[derive(Debug, Clone)]
pub struct ArtifactScorer {
    artifact: ModelArtifact,
    encoder: LabelEncoder,
}

impl ArtifactScorer {
    pub fn new(artifact: ModelArtifact, encoder: LabelEncoder) -> Result<Self, DomainError> {
        if artifact.class_count() != encoder.class_count() {
            return Err(DomainError::configuration(format!(
                "Model scores {} classes but the label encoder defines {}",
                artifact.class_count(),
                encoder.class_count()
            )));
        }

        Ok(Self { artifact, encoder })
    }

    /// Load both artifact files from disk
    pub fn load(
        artifact_path: impl AsRef<Path>,
        label_encoder_path: impl AsRef<Path>,
    ) -> Result<Self, DomainError> {
        let artifact = ModelArtifact::load(artifact_path.as_ref())?;
        let encoder = LabelEncoder::load(label_encoder_path.as_ref())?;
        let scorer = Self::new(artifact, encoder)?;

        info!(
            artifact = %artifact_path.as_ref().display(),
            features = scorer.artifact.feature_names.len(),
            classes = ?scorer.encoder.classes(),
            "Model artifact loaded"
        );

        if scorer.artifact.demo {
            warn!(
                artifact = %artifact_path.as_ref().display(),
                "Serving a demo model with hand-set weights; predictions are not meaningful"
            );
        }

        Ok(scorer)
    }
}

impl Scorer for ArtifactScorer {
    fn score(&self, row: &FeatureRow) -> Result<Score, DomainError> {
        let probabilities = self.artifact.predict_proba(row)?;

        let (class_index, confidence) = arg_max(&probabilities)
            .ok_or_else(|| DomainError::model("Model returned no class probabilities"))?;

        let label = self.encoder.decode(class_index)?;

        Ok(Score::new(label, class_index, confidence))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            kind: self.artifact.kind.as_str().to_string(),
            feature_names: self.artifact.feature_names.clone(),
            classes: self.encoder.classes().to_vec(),
            demo: self.artifact.demo,
        }
    }
}

/// Index and value of the largest probability; ties go to the lowest index
fn arg_max(probabilities: &[f64]) -> Option<(usize, f64)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            Some((_, top)) if p <= top => best,
            _ => Some((i, p)),
        })
}
