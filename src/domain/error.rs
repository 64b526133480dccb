use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing or invalid field '{field}': {reason}")]
    MissingOrInvalidField { field: String, reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unsupported file format: '{filename}'. Expected one of: csv, xlsx, xls")]
    UnsupportedFormat { filename: String },

    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Model error: {message}")]
    Model { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn missing_or_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingOrInvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOrInvalidField { .. }
                | Self::Validation { .. }
                | Self::UnsupportedFormat { .. }
                | Self::EmptyInput { .. }
                | Self::Parse { .. }
        )
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingOrInvalidField { .. } => "missing_or_invalid_field",
            Self::Validation { .. } => "validation",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::EmptyInput { .. } => "empty_input",
            Self::Parse { .. } => "parse",
            Self::Model { .. } => "model",
            Self::Configuration { .. } => "configuration",
            Self::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_invalid_field_error() {
        let error = DomainError::missing_or_invalid("st_rad", "value is required");
        assert_eq!(
            error.to_string(),
            "Missing or invalid field 'st_rad': value is required"
        );
    }

    #[test]
    fn test_unsupported_format_error() {
        let error = DomainError::unsupported_format("planets.json");
        assert_eq!(
            error.to_string(),
            "Unsupported file format: 'planets.json'. Expected one of: csv, xlsx, xls"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::validation("bad").is_client_error());
        assert!(DomainError::empty_input("no rows").is_client_error());
        assert!(DomainError::unsupported_format("a.txt").is_client_error());
        assert!(!DomainError::model("shape mismatch").is_client_error());
        assert!(!DomainError::internal("boom").is_client_error());
    }
}
