use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::super::error::ApiError;
use super::super::state::AppState;

/// Axum middleware that validates authentication via the `AuthProvider`.
///
/// Supports two authentication methods (tried in order):
/// 1. `Authorization: Bearer <token>`
/// 2. `X-API-Key: <key>`
///
/// Every request on a protected route must carry a valid credential;
/// there is no pass-through mode.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&request)?;
    let claims = state.auth_provider.validate_token(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract authentication credential from the request.
///
/// Checks `Authorization: Bearer <token>` first, then `X-API-Key: <key>`.
fn extract_token(request: &Request) -> Result<&str, ApiError> {
    if let Some(auth_header) = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        && let Some(token) = auth_header.strip_prefix("Bearer ")
    {
        return Ok(token);
    }

    if let Some(api_key) = request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
    {
        return Ok(api_key);
    }

    Err(ApiError::Unauthorized {
        message: "authentication required: no token provided".to_string(),
    })
}
