//! User handlers
//!
//! The current user's profile.

use axum::{Extension, Json};

use crate::domain::entities::User;

/// GET /users/me
pub async fn me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
