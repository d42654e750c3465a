//! Feedback handler

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::FeedbackReceipt;
use crate::domain::entities::{FeedbackSubmission, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for sending feedback
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// BUG, SUGGESTION, FEATURE or OTHER
    pub kind: String,
    /// 1-5, or 0 / absent for "not rated"
    #[serde(default)]
    pub rating: Option<i32>,
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Page of the app the feedback was sent from
    pub page: String,
    /// Falls back to the User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl FeedbackRequest {
    fn into_submission(self, headers: &HeaderMap) -> FeedbackSubmission {
        let user_agent = self.user_agent.unwrap_or_else(|| {
            headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        });

        FeedbackSubmission {
            kind: self.kind,
            rating: self.rating,
            message: self.message,
            email: self.email,
            page: self.page,
            user_agent,
        }
    }
}

/// POST /feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackReceipt>), AppError> {
    let submission = request.into_submission(&headers);
    let receipt = state.feedback_service.submit(&user, &submission).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
