//! Feedback domain entity
//!
//! Bug reports, suggestions and feature ideas sent by users from the app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::domain::validation::{require_not_blank, trim_optional};
use crate::error::DomainError;

/// Longest accepted feedback message, in characters
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Unique identifier for a feedback entry (database sequence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackId(pub i64);

impl std::fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Feedback category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackKind {
    Bug,
    Suggestion,
    Feature,
    Other,
}

impl FeedbackKind {
    /// Acknowledgement shown to the user after submitting
    pub fn status_message(&self) -> &'static str {
        match self {
            FeedbackKind::Bug => "Bug reported successfully. We will investigate!",
            FeedbackKind::Suggestion => "Suggestion received. Thanks for contributing!",
            FeedbackKind::Feature => "Feature idea noted. We love the suggestion!",
            FeedbackKind::Other => "Feedback received successfully. Thank you!",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackKind::Bug => write!(f, "BUG"),
            FeedbackKind::Suggestion => write!(f, "SUGGESTION"),
            FeedbackKind::Feature => write!(f, "FEATURE"),
            FeedbackKind::Other => write!(f, "OTHER"),
        }
    }
}

impl std::str::FromStr for FeedbackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUG" => Ok(FeedbackKind::Bug),
            "SUGGESTION" => Ok(FeedbackKind::Suggestion),
            "FEATURE" => Ok(FeedbackKind::Feature),
            "OTHER" => Ok(FeedbackKind::Other),
            _ => Err(format!(
                "Invalid feedback kind '{}'. Valid kinds: BUG, SUGGESTION, FEATURE, OTHER",
                s
            )),
        }
    }
}

/// A stored feedback entry
#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub kind: FeedbackKind,
    pub rating: Option<i16>,
    pub message: String,
    pub email: Option<String>,
    pub page: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

/// Validated feedback ready to be stored
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: UserId,
    pub kind: FeedbackKind,
    pub rating: Option<i16>,
    pub message: String,
    pub email: Option<String>,
    pub page: String,
    pub user_agent: String,
}

/// Raw feedback fields as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackSubmission {
    pub kind: String,
    pub rating: Option<i32>,
    pub message: String,
    pub email: Option<String>,
    pub page: String,
    pub user_agent: String,
}

impl NewFeedback {
    /// Validate a submission. A rating of 0 means "not rated".
    pub fn validate(user_id: UserId, input: &FeedbackSubmission) -> Result<Self, DomainError> {
        require_not_blank(&input.kind, "Feedback kind")?;
        let message = require_not_blank(&input.message, "Feedback message")?.trim();
        let page = require_not_blank(&input.page, "Source page")?;
        let user_agent = require_not_blank(&input.user_agent, "User agent")?;

        let kind: FeedbackKind = input.kind.parse().map_err(DomainError::Validation)?;

        let rating = match input.rating {
            None | Some(0) => None,
            Some(r @ 1..=5) => Some(r as i16),
            Some(r) => {
                return Err(DomainError::Validation(format!(
                    "Invalid rating {}. Rating must be between 1 and 5",
                    r
                )))
            }
        };

        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::Validation(format!(
                "Feedback message too long. Maximum allowed: {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        Ok(Self {
            user_id,
            kind,
            rating,
            message: message.to_string(),
            email: trim_optional(input.email.as_deref()),
            page: page.to_string(),
            user_agent: user_agent.to_string(),
        })
    }
}
