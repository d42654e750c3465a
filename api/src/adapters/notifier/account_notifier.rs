//! Logging account notifier
//!
//! Writes the email-confirmation message, link included, to the tracing
//! pipeline instead of a mailbox.

use async_trait::async_trait;

use crate::domain::entities::{User, CONFIRMATION_TOKEN_TTL_MINUTES};
use crate::domain::ports::AccountNotifier;
use crate::error::NotificationError;

/// AccountNotifier that writes to the tracing pipeline
pub struct LoggingAccountNotifier {
    frontend_url: String,
}

impl LoggingAccountNotifier {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
        }
    }

    /// Link the user follows to confirm their address
    fn confirmation_link(&self, token: &str) -> String {
        format!(
            "{}/confirm-email?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }
}

#[async_trait]
impl AccountNotifier for LoggingAccountNotifier {
    async fn send_confirmation(&self, user: &User, token: &str) -> Result<(), NotificationError> {
        if !user.email.contains('@') {
            return Err(NotificationError::Delivery {
                recipient: user.email.clone(),
                source: None,
            });
        }

        tracing::info!(
            to = %user.email,
            user_id = %user.id,
            link = %self.confirmation_link(token),
            valid_minutes = CONFIRMATION_TOKEN_TTL_MINUTES,
            "Email confirmation sent"
        );

        Ok(())
    }
}
