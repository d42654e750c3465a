//! User domain entity
//!
//! A person using the study-notes application. Users log in with email and
//! password, call the API with an API key and own every discipline, material,
//! summary and feedback entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::require_not_blank;
use crate::error::DomainError;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shortest accepted password
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Longest accepted password
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Password length rules, checked before hashing
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let chars = password.chars().count();
    if chars < MIN_PASSWORD_CHARS {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    if chars > MAX_PASSWORD_CHARS {
        return Err(DomainError::Validation(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_CHARS
        )));
    }
    Ok(())
}

/// The daily counters kept per user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaKind {
    Feedback,
    Summary,
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotaKind::Feedback => write!(f, "feedback"),
            QuotaKind::Summary => write!(f, "summary"),
        }
    }
}

/// Per-day usage counter
///
/// The counter is scoped to a calendar day: usage recorded on an earlier day
/// does not count against today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuota {
    pub used: i32,
    pub day: Option<NaiveDate>,
}

impl DailyQuota {
    /// Usage counted against `today`
    pub fn used_on(&self, today: NaiveDate) -> i32 {
        match self.day {
            Some(day) if day == today => self.used,
            _ => 0,
        }
    }

    /// Whether another use is allowed today under `limit`
    pub fn allows(&self, today: NaiveDate, limit: i32) -> bool {
        self.used_on(today) < limit
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_confirmed: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub feedback_quota: DailyQuota,
    #[serde(skip_serializing)]
    pub summary_quota: DailyQuota,
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub api_key_hash: String,
}

/// Trimmed, lower-cased email, or a validation error
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = require_not_blank(email, "Email")?.trim();
    if !email.contains('@') {
        return Err(DomainError::Validation(format!(
            "Email '{}' is not valid",
            email
        )));
    }
    Ok(email.to_lowercase())
}

impl NewUser {
    pub fn new(
        name: &str,
        email: &str,
        password_hash: String,
        api_key_hash: String,
    ) -> Result<Self, DomainError> {
        let name = require_not_blank(name, "Name")?.trim();
        if name.chars().count() > 100 {
            return Err(DomainError::Validation(
                "Name must be at most 100 characters".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email: normalize_email(email)?,
            password_hash,
            api_key_hash,
        })
    }
}
