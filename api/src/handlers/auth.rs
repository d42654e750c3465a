//! Account handlers
//!
//! Registration, password login and email confirmation. Each returns an API
//! key for later calls (`Authorization: Bearer <api_key>`).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string of the confirmation link
#[derive(Debug, Deserialize)]
pub struct ConfirmEmailQuery {
    pub token: String,
}

/// A user together with a freshly issued API key
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_confirmed: bool,
    pub api_key: String,
    pub message: String,
}

impl SessionResponse {
    fn new(user: User, api_key: String, message: &str) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            email_confirmed: user.email_confirmed,
            api_key,
            message: message.to_string(),
        }
    }
}

/// POST /auth/register (also POST /users/register)
///
/// Register a new user and email a confirmation link. The API key is only
/// shown once.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let (user, api_key) = state
        .user_service
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(
            user,
            api_key,
            "Welcome to PDFocus! Check your inbox to confirm your email. Save your API key, it won't be shown again.",
        )),
    ))
}

/// POST /auth/login
///
/// Issues a new API key; the previous one stops working.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let (user, api_key) = state
        .user_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(SessionResponse::new(user, api_key, "Logged in")))
}

/// POST /auth/confirm-email?token=
pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> Result<Json<SessionResponse>, AppError> {
    let (user, api_key) = state.user_service.confirm_email(&query.token).await?;

    Ok(Json(SessionResponse::new(user, api_key, "Email confirmed")))
}
