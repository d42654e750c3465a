//! Discipline domain entity
//!
//! A course subject grouping a user's materials and summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use crate::domain::validation::{require_not_blank, trim_optional};
use crate::error::DomainError;

/// Unique identifier for a discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisciplineId(pub Uuid);

impl DisciplineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DisciplineId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DisciplineId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DisciplineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Discipline {
    pub id: DisciplineId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated name and description, shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct DisciplineDetails {
    pub name: String,
    pub description: Option<String>,
}

impl DisciplineDetails {
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, DomainError> {
        let name = require_not_blank(name, "Discipline name")?.trim();

        Ok(Self {
            name: name.to_string(),
            description: trim_optional(description),
        })
    }
}

/// Data needed to create a new discipline
#[derive(Debug, Clone)]
pub struct NewDiscipline {
    pub user_id: UserId,
    pub details: DisciplineDetails,
}
