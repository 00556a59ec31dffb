use thiserror::Error;

use crate::common::error::DomainError;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("invalid alert: {0}")]
    InvalidRecord(String),

    #[error("alert store write failed: {0}")]
    StoreFailed(String),

    #[error("alert store query failed: {0}")]
    QueryFailed(String),

    #[error("alert not found: {0}")]
    NotFound(String),
}

impl From<AlertError> for DomainError {
    fn from(e: AlertError) -> Self {
        match e {
            AlertError::InvalidRecord(msg) => DomainError::InvalidArgument(msg),
            other => DomainError::StoreError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_maps_to_invalid_argument() {
        let err: DomainError = AlertError::InvalidRecord("empty message".to_string()).into();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn store_failure_maps_to_store_error() {
        let err: DomainError = AlertError::StoreFailed("disk full".to_string()).into();
        assert!(matches!(err, DomainError::StoreError(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
