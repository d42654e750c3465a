//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::{
    ConfirmationToken, ConfirmationTokenId, Discipline, DisciplineDetails, DisciplineId, Feedback,
    FeedbackId, Material, MaterialId, NewConfirmationToken, NewDiscipline, NewFeedback,
    NewMaterial, NewSummary, NewUser, QuotaKind, Summary, SummaryId, SummaryText, User, UserId,
};
use crate::error::DomainError;

/// One page of a larger result set
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total_items.div_ceil(per_page)
        };
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Count one use of a daily quota if fewer than `limit` uses are
    /// recorded for `today`, resetting the counter on a new day.
    ///
    /// The check and the increment are a single step, so concurrent callers
    /// can never push the counter past `limit`. Returns `false` and changes
    /// nothing when the limit is already reached.
    async fn try_consume_quota(
        &self,
        id: &UserId,
        kind: QuotaKind,
        today: NaiveDate,
        limit: i32,
    ) -> Result<bool, DomainError>;

    /// Replace the stored API key hash
    async fn set_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError>;

    /// Flag the user's email address as confirmed
    async fn mark_email_confirmed(&self, id: &UserId) -> Result<(), DomainError>;
}

/// Repository for email confirmation tokens
#[async_trait]
pub trait ConfirmationTokenRepository: Send + Sync {
    async fn create(&self, token: &NewConfirmationToken)
        -> Result<ConfirmationToken, DomainError>;

    async fn find_by_token_hash(&self, hash: &str)
        -> Result<Option<ConfirmationToken>, DomainError>;

    /// Record the token as used at `at`. Returns `false` if it was already used.
    async fn mark_confirmed(
        &self,
        id: &ConfirmationTokenId,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}

/// Repository for Discipline entities
///
/// Lookups are scoped by owner: a discipline belonging to someone else is
/// reported as absent.
#[async_trait]
pub trait DisciplineRepository: Send + Sync {
    async fn create(&self, discipline: &NewDiscipline) -> Result<Discipline, DomainError>;

    async fn find_by_id_and_user(
        &self,
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Option<Discipline>, DomainError>;

    /// Check that a discipline exists and belongs to the user
    async fn exists_for_user(
        &self,
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// All disciplines of a user, ordered by name
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Discipline>, DomainError>;

    async fn update(
        &self,
        id: &DisciplineId,
        details: &DisciplineDetails,
    ) -> Result<Discipline, DomainError>;

    async fn delete(&self, id: &DisciplineId) -> Result<(), DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

/// Repository for Summary entities
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    async fn create(&self, summary: &NewSummary) -> Result<Summary, DomainError>;

    async fn find_by_id_and_user(
        &self,
        id: &SummaryId,
        user_id: &UserId,
    ) -> Result<Option<Summary>, DomainError>;

    /// All summaries of a user, newest first
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Summary>, DomainError>;

    /// Summaries of one discipline, newest first
    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Summary>, DomainError>;

    async fn update(&self, id: &SummaryId, text: &SummaryText) -> Result<Summary, DomainError>;

    async fn delete(&self, id: &SummaryId) -> Result<(), DomainError>;

    /// Remove every summary of a discipline, returning how many were removed
    async fn delete_by_discipline(&self, discipline_id: &DisciplineId)
        -> Result<u64, DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

/// Repository for Material records (metadata only, bytes live in storage)
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: &NewMaterial) -> Result<Material, DomainError>;

    async fn find_by_id_and_user(
        &self,
        id: &MaterialId,
        user_id: &UserId,
    ) -> Result<Option<Material>, DomainError>;

    /// Materials of one discipline, newest first
    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Material>, DomainError>;

    /// One page of a discipline's materials, newest first
    async fn page_by_discipline(
        &self,
        discipline_id: &DisciplineId,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Material>, DomainError>;

    /// Most recently uploaded materials of a user
    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
    ) -> Result<Vec<Material>, DomainError>;

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError>;

    /// Remove every material record of a discipline, returning how many were removed
    async fn delete_by_discipline(&self, discipline_id: &DisciplineId)
        -> Result<u64, DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

/// Repository for Feedback entries
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: &NewFeedback) -> Result<Feedback, DomainError>;

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_counts_total_pages() {
        let page = Page::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 1, 2, 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 2);
    }
}
