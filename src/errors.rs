use finboard_config::ConfigError;
use finboard_core::{CoreError, ValidationError};
use thiserror::Error;

/// Every failure the service layer and CLI can surface.
///
/// Data integrity problems are not errors; they travel on the report as warnings.
#[derive(Debug, Error)]
pub enum FinboardError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ValidationError> for FinboardError {
    fn from(err: ValidationError) -> Self {
        FinboardError::Core(CoreError::Validation(err))
    }
}

impl FinboardError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FinboardError::Core(CoreError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_keep_their_message() {
        let err = FinboardError::from(ValidationError::NonPositivePageSize(0));
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed: page size must be positive (got 0)"
        );
    }
}
