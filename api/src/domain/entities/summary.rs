//! Summary domain entity
//!
//! Textual content attached to a discipline, either written by the user or
//! generated from one of their materials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DisciplineId, MaterialId, UserId};
use crate::domain::validation::require_not_blank;
use crate::error::DomainError;

/// Unique identifier for a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryId(pub Uuid);

impl SummaryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SummaryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SummaryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SummaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub id: SummaryId,
    pub user_id: UserId,
    pub discipline_id: DisciplineId,
    pub title: String,
    pub content: String,
    /// Material the summary was generated from, if any
    pub material_id: Option<MaterialId>,
    pub created_at: DateTime<Utc>,
}

/// Validated title and content
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryText {
    pub title: String,
    pub content: String,
}

impl SummaryText {
    pub fn new(title: &str, content: &str) -> Result<Self, DomainError> {
        let title = require_not_blank(title, "Title")?.trim();
        let content = require_not_blank(content, "Content")?;

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

/// Data needed to create a new summary
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub user_id: UserId,
    pub discipline_id: DisciplineId,
    pub text: SummaryText,
    pub material_id: Option<MaterialId>,
}
