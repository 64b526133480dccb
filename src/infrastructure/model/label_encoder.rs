//! Class index to label mapping

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Maps the model's class indices back to disposition labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, DomainError> {
        if classes.len() < 2 {
            return Err(DomainError::configuration(
                "Label encoder must define at least two classes",
            ));
        }

        Ok(Self { classes })
    }

    /// Load an encoder from a JSON file of the form `{"classes": [...]}`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read label encoder '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        let encoder: LabelEncoder = serde_json::from_str(content).map_err(|e| {
            DomainError::configuration(format!("Invalid label encoder: {}", e))
        })?;

        Self::new(encoder.classes)
    }

    /// Decode a class index
    pub fn decode(&self, index: usize) -> Result<&str, DomainError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                DomainError::model(format!(
                    "Class index {} is outside the label encoder's {} classes",
                    index,
                    self.classes.len()
                ))
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of labels; always at least two
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let encoder = LabelEncoder::from_json(
            r#"{"classes": ["CANDIDATE", "CONFIRMED", "FALSE POSITIVE"]}"#,
        )
        .unwrap();

        assert_eq!(encoder.decode(0).unwrap(), "CANDIDATE");
        assert_eq!(encoder.decode(2).unwrap(), "FALSE POSITIVE");
        assert!(matches!(encoder.decode(3), Err(DomainError::Model { .. })));
    }

    #[test]
    fn test_requires_two_classes() {
        let err = LabelEncoder::from_json(r#"{"classes": ["ONLY"]}"#).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(LabelEncoder::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("label_encoder.json");
        std::fs::write(&path, r#"{"classes": ["FALSE POSITIVE", "CONFIRMED"]}"#).expect("write");

        let encoder = LabelEncoder::load(&path).unwrap();
        assert_eq!(encoder.class_count(), 2);
        assert_eq!(encoder.classes()[1], "CONFIRMED");
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabelEncoder::load("/nonexistent/label_encoder.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read label encoder"));
    }
}
