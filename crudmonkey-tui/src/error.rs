//! Error types for the TUI.

use crate::config::ConfigError;
use crudmonkey_core::{ConfigurationError, CrudError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Crud(#[from] CrudError),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl From<ConfigurationError> for TuiError {
    fn from(err: ConfigurationError) -> Self {
        TuiError::Crud(err.into())
    }
}

impl From<StoreError> for TuiError {
    fn from(err: StoreError) -> Self {
        TuiError::Crud(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_through_crud_error() {
        let err: TuiError = StoreError::LockPoisoned.into();
        assert!(matches!(err, TuiError::Crud(CrudError::Store(StoreError::LockPoisoned))));
        assert!(err.to_string().starts_with("Store error"));
    }

    #[test]
    fn test_configuration_error_converts_through_crud_error() {
        let err: TuiError = ConfigurationError::EmptyResourceName.into();
        assert!(matches!(
            err,
            TuiError::Crud(CrudError::Configuration(ConfigurationError::EmptyResourceName))
        ));
    }
}
