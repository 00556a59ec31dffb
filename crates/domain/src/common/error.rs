use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("store error: {0}")]
    StoreError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::InvalidArgument("missing to".to_string()).to_string(),
            "invalid argument: missing to"
        );
        assert_eq!(
            DomainError::TransportError("HTTP 503".to_string()).to_string(),
            "transport error: HTTP 503"
        );
    }
}
