//! Email confirmation token
//!
//! Issued at registration and sent to the user's email address. Only the
//! SHA-256 hash of the raw token is stored. A token can be used once and
//! expires shortly after it is issued.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::UserId;

/// How long a confirmation token stays valid
pub const CONFIRMATION_TOKEN_TTL_MINUTES: i64 = 15;

/// Unique identifier for a confirmation token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationTokenId(pub Uuid);

impl From<Uuid> for ConfirmationTokenId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ConfirmationTokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationToken {
    pub id: ConfirmationTokenId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl ConfirmationToken {
    /// Unused and not yet expired at `now`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.confirmed_at.is_none() && now < self.expires_at
    }
}

/// Data needed to store a new confirmation token
#[derive(Debug, Clone)]
pub struct NewConfirmationToken {
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl NewConfirmationToken {
    pub fn issued_at(user_id: UserId, token_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token_hash,
            expires_at: now + Duration::minutes(CONFIRMATION_TOKEN_TTL_MINUTES),
        }
    }
}
