//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::io::AsyncReadExt;

use uuid::Uuid;

use crate::domain::entities::{
    ConfirmationToken, ConfirmationTokenId, DailyQuota, Discipline, DisciplineDetails,
    DisciplineId, Feedback, FeedbackId, Material, MaterialId, NewConfirmationToken,
    NewDiscipline, NewFeedback, NewMaterial, NewSummary, NewUser, QuotaKind, Summary, SummaryId,
    SummaryText, User, UserId,
};
use crate::domain::ports::{
    AccountNotifier, ByteStream, ConfirmationTokenRepository, DisciplineRepository,
    FeedbackNotifier, FeedbackRepository, MaterialRepository, MaterialStorage, Page,
    StoredLocation, SummaryRepository, TextExtractor, UserRepository,
};
use crate::error::{DomainError, NotificationError};

fn io_failure(what: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("simulated {} failure", what))
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    /// Current stored state of a user
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.read().unwrap().get(id).cloned()
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().unwrap();
        users.values().find(|u| u.email == email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.api_key_hash == hash).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }

        let created = User {
            id: UserId::new(),
            name: user.name.clone(),
            email: user.email.clone(),
            email_confirmed: false,
            password_hash: user.password_hash.clone(),
            api_key_hash: user.api_key_hash.clone(),
            created_at: Utc::now(),
            feedback_quota: DailyQuota::default(),
            summary_quota: DailyQuota::default(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn try_consume_quota(
        &self,
        id: &UserId,
        kind: QuotaKind,
        today: NaiveDate,
        limit: i32,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.get_mut(id) else {
            return Ok(false);
        };
        let quota = match kind {
            QuotaKind::Feedback => &mut user.feedback_quota,
            QuotaKind::Summary => &mut user.summary_quota,
        };
        if !quota.allows(today, limit) {
            return Ok(false);
        }
        *quota = DailyQuota {
            used: quota.used_on(today) + 1,
            day: Some(today),
        };
        Ok(true)
    }

    async fn set_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        user.api_key_hash = hash.to_string();
        Ok(())
    }

    async fn mark_email_confirmed(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        user.email_confirmed = true;
        Ok(())
    }
}

// ============================================================================
// In-Memory Confirmation Token Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryConfirmationTokenRepository {
    tokens: Arc<RwLock<HashMap<ConfirmationTokenId, ConfirmationToken>>>,
}

impl InMemoryConfirmationTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every token's expiry to `expires_at`
    pub fn expire_all(&self, expires_at: DateTime<Utc>) {
        for token in self.tokens.write().unwrap().values_mut() {
            token.expires_at = expires_at;
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl ConfirmationTokenRepository for InMemoryConfirmationTokenRepository {
    async fn create(
        &self,
        token: &NewConfirmationToken,
    ) -> Result<ConfirmationToken, DomainError> {
        let created = ConfirmationToken {
            id: ConfirmationTokenId(Uuid::new_v4()),
            user_id: token.user_id,
            token_hash: token.token_hash.clone(),
            expires_at: token.expires_at,
            confirmed_at: None,
        };
        self.tokens
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ConfirmationToken>, DomainError> {
        let tokens = self.tokens.read().unwrap();
        Ok(tokens.values().find(|t| t.token_hash == hash).cloned())
    }

    async fn mark_confirmed(
        &self,
        id: &ConfirmationTokenId,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().unwrap();
        match tokens.get_mut(id) {
            Some(token) if token.confirmed_at.is_none() => {
                token.confirmed_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// In-Memory Discipline Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryDisciplineRepository {
    disciplines: Arc<RwLock<HashMap<DisciplineId, Discipline>>>,
}

impl InMemoryDisciplineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a discipline for testing
    pub fn with_discipline(self, discipline: Discipline) -> Self {
        self.disciplines
            .write()
            .unwrap()
            .insert(discipline.id, discipline);
        self
    }

    pub fn contains(&self, id: &DisciplineId) -> bool {
        self.disciplines.read().unwrap().contains_key(id)
    }
}

#[async_trait]
impl DisciplineRepository for InMemoryDisciplineRepository {
    async fn create(&self, discipline: &NewDiscipline) -> Result<Discipline, DomainError> {
        let created = Discipline {
            id: DisciplineId::new(),
            user_id: discipline.user_id,
            name: discipline.details.name.clone(),
            description: discipline.details.description.clone(),
            created_at: Utc::now(),
        };
        self.disciplines
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id_and_user(
        &self,
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Option<Discipline>, DomainError> {
        let disciplines = self.disciplines.read().unwrap();
        Ok(disciplines
            .get(id)
            .filter(|d| d.user_id == *user_id)
            .cloned())
    }

    async fn exists_for_user(
        &self,
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self.find_by_id_and_user(id, user_id).await?.is_some())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Discipline>, DomainError> {
        let disciplines = self.disciplines.read().unwrap();
        let mut owned: Vec<Discipline> = disciplines
            .values()
            .filter(|d| d.user_id == *user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owned)
    }

    async fn update(
        &self,
        id: &DisciplineId,
        details: &DisciplineDetails,
    ) -> Result<Discipline, DomainError> {
        let mut disciplines = self.disciplines.write().unwrap();
        let discipline = disciplines
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Discipline", id))?;
        discipline.name = details.name.clone();
        discipline.description = details.description.clone();
        Ok(discipline.clone())
    }

    async fn delete(&self, id: &DisciplineId) -> Result<(), DomainError> {
        self.disciplines.write().unwrap().remove(id);
        Ok(())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let disciplines = self.disciplines.read().unwrap();
        Ok(disciplines.values().filter(|d| d.user_id == *user_id).count() as u64)
    }
}

// ============================================================================
// In-Memory Summary Repository
// ============================================================================

/// Keeps insertion order so "newest first" is deterministic
#[derive(Default)]
pub struct InMemorySummaryRepository {
    summaries: Arc<RwLock<Vec<Summary>>>,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a summary for testing
    pub fn with_summary(self, summary: Summary) -> Self {
        self.summaries.write().unwrap().push(summary);
        self
    }

    pub fn len(&self) -> usize {
        self.summaries.read().unwrap().len()
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryRepository {
    async fn create(&self, summary: &NewSummary) -> Result<Summary, DomainError> {
        let created = Summary {
            id: SummaryId::new(),
            user_id: summary.user_id,
            discipline_id: summary.discipline_id,
            title: summary.text.title.clone(),
            content: summary.text.content.clone(),
            material_id: summary.material_id,
            created_at: Utc::now(),
        };
        self.summaries.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id_and_user(
        &self,
        id: &SummaryId,
        user_id: &UserId,
    ) -> Result<Option<Summary>, DomainError> {
        let summaries = self.summaries.read().unwrap();
        Ok(summaries
            .iter()
            .find(|s| s.id == *id && s.user_id == *user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Summary>, DomainError> {
        let summaries = self.summaries.read().unwrap();
        Ok(summaries
            .iter()
            .rev()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Summary>, DomainError> {
        let summaries = self.summaries.read().unwrap();
        Ok(summaries
            .iter()
            .rev()
            .filter(|s| s.discipline_id == *discipline_id && s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &SummaryId, text: &SummaryText) -> Result<Summary, DomainError> {
        let mut summaries = self.summaries.write().unwrap();
        let summary = summaries
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| DomainError::not_found("Summary", id))?;
        summary.title = text.title.clone();
        summary.content = text.content.clone();
        Ok(summary.clone())
    }

    async fn delete(&self, id: &SummaryId) -> Result<(), DomainError> {
        self.summaries.write().unwrap().retain(|s| s.id != *id);
        Ok(())
    }

    async fn delete_by_discipline(
        &self,
        discipline_id: &DisciplineId,
    ) -> Result<u64, DomainError> {
        let mut summaries = self.summaries.write().unwrap();
        let before = summaries.len();
        summaries.retain(|s| s.discipline_id != *discipline_id);
        Ok((before - summaries.len()) as u64)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let summaries = self.summaries.read().unwrap();
        Ok(summaries.iter().filter(|s| s.user_id == *user_id).count() as u64)
    }
}

// ============================================================================
// In-Memory Material Repository
// ============================================================================

/// Keeps insertion order so "newest first" is deterministic
#[derive(Default)]
pub struct InMemoryMaterialRepository {
    materials: Arc<RwLock<Vec<Material>>>,
    fail_creates: AtomicBool,
}

impl InMemoryMaterialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a material for testing
    pub fn with_material(self, material: Material) -> Self {
        self.materials.write().unwrap().push(material);
        self
    }

    /// Make every `create` fail with a database error
    pub fn failing_creates(self) -> Self {
        self.fail_creates.store(true, Ordering::SeqCst);
        self
    }

    pub fn len(&self) -> usize {
        self.materials.read().unwrap().len()
    }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn create(&self, material: &NewMaterial) -> Result<Material, DomainError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DomainError::Database("simulated insert failure".to_string()));
        }

        let created = Material {
            id: MaterialId::new(),
            user_id: material.user_id,
            discipline_id: material.discipline_id,
            original_name: material.original_name.clone(),
            storage_name: material.storage_name.clone(),
            content_type: material.content_type.clone(),
            size: material.size,
            uploaded_at: Utc::now(),
        };
        self.materials.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id_and_user(
        &self,
        id: &MaterialId,
        user_id: &UserId,
    ) -> Result<Option<Material>, DomainError> {
        let materials = self.materials.read().unwrap();
        Ok(materials
            .iter()
            .find(|m| m.id == *id && m.user_id == *user_id)
            .cloned())
    }

    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Material>, DomainError> {
        let materials = self.materials.read().unwrap();
        Ok(materials
            .iter()
            .rev()
            .filter(|m| m.discipline_id == *discipline_id && m.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn page_by_discipline(
        &self,
        discipline_id: &DisciplineId,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Material>, DomainError> {
        let materials = self.materials.read().unwrap();
        let all: Vec<Material> = materials
            .iter()
            .rev()
            .filter(|m| m.discipline_id == *discipline_id)
            .cloned()
            .collect();
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip((page * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok(Page::new(items, page, per_page, total))
    }

    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
    ) -> Result<Vec<Material>, DomainError> {
        let materials = self.materials.read().unwrap();
        Ok(materials
            .iter()
            .rev()
            .filter(|m| m.user_id == *user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError> {
        self.materials.write().unwrap().retain(|m| m.id != *id);
        Ok(())
    }

    async fn delete_by_discipline(
        &self,
        discipline_id: &DisciplineId,
    ) -> Result<u64, DomainError> {
        let mut materials = self.materials.write().unwrap();
        let before = materials.len();
        materials.retain(|m| m.discipline_id != *discipline_id);
        Ok((before - materials.len()) as u64)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let materials = self.materials.read().unwrap();
        Ok(materials.iter().filter(|m| m.user_id == *user_id).count() as u64)
    }
}

// ============================================================================
// In-Memory Feedback Repository
// ============================================================================

pub struct InMemoryFeedbackRepository {
    entries: Arc<RwLock<HashMap<FeedbackId, Feedback>>>,
    next_id: AtomicI64,
}

impl Default for InMemoryFeedbackRepository {
    fn default() -> Self {
        Self {
            entries: Arc::default(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn create(&self, entry: &NewFeedback) -> Result<Feedback, DomainError> {
        let created = Feedback {
            id: FeedbackId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id: entry.user_id,
            kind: entry.kind,
            rating: entry.rating,
            message: entry.message.clone(),
            email: entry.email.clone(),
            page: entry.page.clone(),
            user_agent: entry.user_agent.clone(),
            created_at: Utc::now(),
        };
        self.entries
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError> {
        Ok(self.entries.read().unwrap().get(id).cloned())
    }
}

// ============================================================================
// In-Memory Material Storage
// ============================================================================

#[derive(Default)]
pub struct InMemoryMaterialStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_saves: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryMaterialStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a stored file for testing
    pub fn with_file(self, storage_name: &str, bytes: &[u8]) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(storage_name.to_string(), bytes.to_vec());
        self
    }

    /// Make every `save` fail with a storage error
    pub fn failing_saves(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Make every `delete` fail with a storage error
    pub fn failing_deletes(self) -> Self {
        self.fail_deletes.store(true, Ordering::SeqCst);
        self
    }

    pub fn contains(&self, storage_name: &str) -> bool {
        self.files.read().unwrap().contains_key(storage_name)
    }

    pub fn len(&self) -> usize {
        self.files.read().unwrap().len()
    }
}

#[async_trait]
impl MaterialStorage for InMemoryMaterialStorage {
    async fn save(
        &self,
        storage_name: &str,
        mut content: ByteStream<'_>,
    ) -> Result<StoredLocation, DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::storage(
                format!("could not write {}", storage_name),
                io_failure("write"),
            ));
        }

        let mut bytes = Vec::new();
        content
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| DomainError::storage(format!("could not write {}", storage_name), e))?;

        let written = bytes.len() as u64;
        self.files
            .write()
            .unwrap()
            .insert(storage_name.to_string(), bytes);

        Ok(StoredLocation {
            location: format!("memory://{}", storage_name),
            bytes_written: written,
        })
    }

    async fn load(&self, storage_name: &str) -> Result<Vec<u8>, DomainError> {
        self.files
            .read()
            .unwrap()
            .get(storage_name)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Stored file", storage_name))
    }

    async fn delete(&self, storage_name: &str) -> Result<(), DomainError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::storage(
                format!("could not delete {}", storage_name),
                io_failure("delete"),
            ));
        }
        self.files.write().unwrap().remove(storage_name);
        Ok(())
    }
}

// ============================================================================
// Stub Text Extractor
// ============================================================================

/// Returns a fixed text, or an extraction failure when built with `failing`
pub struct StubTextExtractor {
    text: Option<String>,
    calls: AtomicI64,
}

impl StubTextExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicI64::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicI64::new(0),
        }
    }

    pub fn calls(&self) -> i64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for StubTextExtractor {
    async fn extract_text(&self, material: &Material) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or_else(|| {
            DomainError::extraction(format!("could not read {}", material.original_name))
        })
    }
}

// ============================================================================
// Recording Feedback Notifier
// ============================================================================

/// Records every notified feedback; optionally fails delivery
#[derive(Default)]
pub struct RecordingFeedbackNotifier {
    sent: Arc<Mutex<Vec<Feedback>>>,
    fail: AtomicBool,
}

impl RecordingFeedbackNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn sent(&self) -> Vec<Feedback> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackNotifier for RecordingFeedbackNotifier {
    async fn notify(&self, feedback: &Feedback) -> Result<(), NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery {
                recipient: "feedback@test.local".to_string(),
                source: None,
            });
        }
        self.sent.lock().unwrap().push(feedback.clone());
        Ok(())
    }
}

// ============================================================================
// Recording Account Notifier
// ============================================================================

/// Records the raw token of every confirmation email; optionally fails delivery
#[derive(Default)]
pub struct RecordingAccountNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: AtomicBool,
}

impl RecordingAccountNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    /// Token of the last confirmation email sent to `email`
    pub fn token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl AccountNotifier for RecordingAccountNotifier {
    async fn send_confirmation(&self, user: &User, token: &str) -> Result<(), NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery {
                recipient: user.email.clone(),
                source: None,
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((user.email.clone(), token.to_string()));
        Ok(())
    }
}
