use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::alert::error::AlertError;
use domain::auth::error::AuthError;
use domain::common::error::DomainError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub(crate) struct ErrorDetail {
    /// Machine-readable error code (e.g. `invalid-argument`).
    #[schema(value_type = String)]
    code: &'static str,
    /// Human-readable description of the error.
    message: String,
}

/// Standard API error type.
///
/// All variants produce a JSON response matching:
/// `{"error":{"code":"kebab-case","message":"human-readable"}}`.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized { message: String },
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Unauthorized { message } => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", message)
            }
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, "invalid-argument", message),
            Self::NotFound { message } => (StatusCode::NOT_FOUND, "not-found", message),
            Self::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, "internal", message),
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Unauthorized {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidArgument(_) => Self::BadRequest {
                message: err.to_string(),
            },
            DomainError::TransportError(_) | DomainError::StoreError(_) => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<AlertError> for ApiError {
    fn from(err: AlertError) -> Self {
        match &err {
            AlertError::NotFound(_) => Self::NotFound {
                message: err.to_string(),
            },
            AlertError::InvalidRecord(_) => Self::BadRequest {
                message: err.to_string(),
            },
            AlertError::StoreFailed(_) | AlertError::QueryFailed(_) => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}
