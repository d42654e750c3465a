//! Logging feedback notifier
//!
//! Emits one structured log event per feedback entry, addressed to the
//! configured inbox. Stands in for outbound email until a mail provider is
//! wired up.

use async_trait::async_trait;

use crate::domain::entities::Feedback;
use crate::domain::ports::FeedbackNotifier;
use crate::error::NotificationError;

/// FeedbackNotifier that writes to the tracing pipeline
pub struct LoggingFeedbackNotifier {
    inbox: String,
}

impl LoggingFeedbackNotifier {
    pub fn new(inbox: impl Into<String>) -> Self {
        Self {
            inbox: inbox.into(),
        }
    }
}

/// Rating rendered as stars, e.g. `★★★☆☆ (3/5)`
fn rating_label(rating: Option<i16>) -> String {
    match rating {
        Some(r @ 1..=5) => format!(
            "{}{} ({}/5)",
            "★".repeat(r as usize),
            "☆".repeat(5 - r as usize),
            r
        ),
        _ => "N/A".to_string(),
    }
}

#[async_trait]
impl FeedbackNotifier for LoggingFeedbackNotifier {
    async fn notify(&self, feedback: &Feedback) -> Result<(), NotificationError> {
        if !self.inbox.contains('@') {
            return Err(NotificationError::Configuration(format!(
                "feedback inbox '{}' is not an email address",
                self.inbox
            )));
        }

        tracing::info!(
            to = %self.inbox,
            feedback_id = %feedback.id,
            kind = %feedback.kind,
            from = feedback.email.as_deref().unwrap_or("anonymous"),
            rating = %rating_label(feedback.rating),
            page = %feedback.page,
            created_at = %feedback.created_at.format("%d/%m/%Y %H:%M"),
            message = %feedback.message,
            "Feedback received"
        );

        Ok(())
    }
}
