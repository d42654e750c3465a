//! Feedback service
//!
//! Stores feedback sent from the app and lets the team know about it.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{
    FeedbackId, FeedbackKind, FeedbackSubmission, NewFeedback, QuotaKind, User,
};
use crate::domain::ports::{FeedbackNotifier, FeedbackRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Acknowledgement returned after a submission
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReceipt {
    pub id: FeedbackId,
    pub kind: FeedbackKind,
    pub status_message: &'static str,
    /// e.g. "14/03/2024 at 09:30"
    pub sent_at: String,
}

pub struct FeedbackService<FR, UR, FN>
where
    FR: FeedbackRepository,
    UR: UserRepository,
    FN: FeedbackNotifier,
{
    feedback: Arc<FR>,
    users: Arc<UR>,
    notifier: Arc<FN>,
    daily_limit: i32,
}

impl<FR, UR, FN> FeedbackService<FR, UR, FN>
where
    FR: FeedbackRepository,
    UR: UserRepository,
    FN: FeedbackNotifier,
{
    pub fn new(feedback: Arc<FR>, users: Arc<UR>, notifier: Arc<FN>, daily_limit: i32) -> Self {
        Self {
            feedback,
            users,
            notifier,
            daily_limit,
        }
    }

    /// Validate, store and announce a feedback entry
    ///
    /// A failed notification is logged; the feedback is already stored at that point.
    pub async fn submit(
        &self,
        user: &User,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackReceipt, AppError> {
        let new_feedback = NewFeedback::validate(user.id, submission)?;

        let now = Utc::now();
        let today = now.date_naive();
        let limit_reached = || {
            AppError::Domain(DomainError::QuotaExceeded(format!(
                "Daily feedback limit of {} reached. Try again tomorrow",
                self.daily_limit
            )))
        };
        if !user.feedback_quota.allows(today, self.daily_limit) {
            return Err(limit_reached());
        }
        // The snapshot on `user` may be stale; the repository has the final say
        if !self
            .users
            .try_consume_quota(&user.id, QuotaKind::Feedback, today, self.daily_limit)
            .await?
        {
            return Err(limit_reached());
        }

        let stored = self.feedback.create(&new_feedback).await?;

        if let Err(e) = self.notifier.notify(&stored).await {
            tracing::warn!(feedback_id = %stored.id, error = %e, "Feedback notification failed");
        }

        tracing::info!(feedback_id = %stored.id, kind = %stored.kind, "Feedback received");

        Ok(FeedbackReceipt {
            id: stored.id,
            kind: stored.kind,
            status_message: stored.kind.status_message(),
            sent_at: now.format("%d/%m/%Y at %H:%M").to_string(),
        })
    }
}
