//! Notification ports
//!
//! Outbound messages: feedback for the team, account emails for users.
//! Delivery mechanics (SMTP, webhooks, logs) are up to the adapter.

use async_trait::async_trait;

use crate::domain::entities::{Feedback, User};
use crate::error::NotificationError;

#[async_trait]
pub trait FeedbackNotifier: Send + Sync {
    async fn notify(&self, feedback: &Feedback) -> Result<(), NotificationError>;
}

#[async_trait]
pub trait AccountNotifier: Send + Sync {
    /// Send the email-confirmation message carrying the raw `token`
    async fn send_confirmation(&self, user: &User, token: &str) -> Result<(), NotificationError>;
}
