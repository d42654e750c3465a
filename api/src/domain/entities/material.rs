//! Material domain entity
//!
//! A user-uploaded binary file (usually a PDF). The bytes live in material
//! storage under a generated storage name; this entity only holds the
//! reference and descriptive metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DisciplineId, UserId};
use crate::domain::validation::require_not_blank;
use crate::error::DomainError;

/// Content type used when the client does not send one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Unique identifier for a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub Uuid);

impl MaterialId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MaterialId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded material
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: MaterialId,
    pub user_id: UserId,
    pub discipline_id: DisciplineId,
    pub original_name: String,
    /// Key under which the bytes are kept in material storage
    pub storage_name: String,
    pub content_type: String,
    /// Size in bytes
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Data needed to record a new material
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub user_id: UserId,
    pub discipline_id: DisciplineId,
    pub original_name: String,
    pub storage_name: String,
    pub content_type: String,
    pub size: i64,
}

impl NewMaterial {
    pub fn new(
        user_id: UserId,
        discipline_id: DisciplineId,
        original_name: &str,
        storage_name: &str,
        content_type: &str,
        size: i64,
    ) -> Result<Self, DomainError> {
        require_not_blank(original_name, "Original file name")?;
        require_not_blank(storage_name, "Storage name")?;
        require_not_blank(content_type, "Content type")?;
        if size <= 0 {
            return Err(DomainError::Validation(
                "File size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            discipline_id,
            original_name: original_name.to_string(),
            storage_name: storage_name.to_string(),
            content_type: content_type.to_string(),
            size,
        })
    }
}

/// Generate a fresh storage name, keeping the original file's extension
///
/// `"notes.PDF"` becomes `"<uuid>.PDF"`; names without an extension get a
/// bare UUID.
pub fn generate_storage_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(original_name) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

/// Extension of a file name, without the dot
pub fn file_extension(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
