//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::AppState;

/// Extract the API key from the Authorization header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

/// Authentication middleware
///
/// Validates the API key and injects the `User` into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    let user = state
        .user_service
        .find_by_api_key(api_key)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = %user.id, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
