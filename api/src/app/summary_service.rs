//! Summary service
//!
//! Manual summaries (CRUD) and automatic summaries generated from an uploaded
//! material, limited by a per-user daily quota.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::domain::entities::{
    DisciplineId, MaterialId, NewSummary, QuotaKind, Summary, SummaryId, SummaryText, User,
};
use crate::domain::ports::{
    DisciplineRepository, MaterialRepository, Summarizer, SummaryRepository, TextExtractor,
    UserRepository,
};
use crate::domain::validation::trim_optional;
use crate::error::{AppError, DomainError};

/// Word budget for generated summaries
pub const GENERATED_SUMMARY_WORDS: usize = 300;

/// Request to generate a summary from a material
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSummary {
    pub material_id: MaterialId,
    pub discipline_id: DisciplineId,
    /// Defaults to "Summary - <original file name>"
    #[serde(default)]
    pub title: Option<String>,
    /// Use this text instead of extracting it from the material
    #[serde(default)]
    pub content: Option<String>,
}

/// Service for managing summaries
pub struct SummaryService<SR, DR, MR, UR, TE, SZ>
where
    SR: SummaryRepository,
    DR: DisciplineRepository,
    MR: MaterialRepository,
    UR: UserRepository,
    TE: TextExtractor,
    SZ: Summarizer,
{
    summaries: Arc<SR>,
    disciplines: Arc<DR>,
    materials: Arc<MR>,
    users: Arc<UR>,
    extractor: Arc<TE>,
    summarizer: Arc<SZ>,
    daily_limit: i32,
}

impl<SR, DR, MR, UR, TE, SZ> SummaryService<SR, DR, MR, UR, TE, SZ>
where
    SR: SummaryRepository,
    DR: DisciplineRepository,
    MR: MaterialRepository,
    UR: UserRepository,
    TE: TextExtractor,
    SZ: Summarizer,
{
    pub fn new(
        summaries: Arc<SR>,
        disciplines: Arc<DR>,
        materials: Arc<MR>,
        users: Arc<UR>,
        extractor: Arc<TE>,
        summarizer: Arc<SZ>,
        daily_limit: i32,
    ) -> Self {
        Self {
            summaries,
            disciplines,
            materials,
            users,
            extractor,
            summarizer,
            daily_limit,
        }
    }

    async fn ensure_discipline(&self, user: &User, id: &DisciplineId) -> Result<(), AppError> {
        if !self.disciplines.exists_for_user(id, &user.id).await? {
            return Err(AppError::Domain(DomainError::not_found("Discipline", id)));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        user: &User,
        discipline_id: &DisciplineId,
        title: &str,
        content: &str,
    ) -> Result<Summary, AppError> {
        let text = SummaryText::new(title, content)?;
        self.ensure_discipline(user, discipline_id).await?;

        let summary = self
            .summaries
            .create(&NewSummary {
                user_id: user.id,
                discipline_id: *discipline_id,
                text,
                material_id: None,
            })
            .await?;

        tracing::info!(summary_id = %summary.id, "Summary created");
        Ok(summary)
    }

    /// All of the user's summaries, newest first
    pub async fn list(&self, user: &User) -> Result<Vec<Summary>, AppError> {
        Ok(self.summaries.list_by_user(&user.id).await?)
    }

    pub async fn list_by_discipline(
        &self,
        user: &User,
        discipline_id: &DisciplineId,
    ) -> Result<Vec<Summary>, AppError> {
        self.ensure_discipline(user, discipline_id).await?;
        Ok(self
            .summaries
            .list_by_discipline_and_user(discipline_id, &user.id)
            .await?)
    }

    pub async fn get(&self, user: &User, id: &SummaryId) -> Result<Summary, AppError> {
        self.summaries
            .find_by_id_and_user(id, &user.id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::not_found("Summary", id)))
    }

    pub async fn update(
        &self,
        user: &User,
        id: &SummaryId,
        title: &str,
        content: &str,
    ) -> Result<Summary, AppError> {
        self.get(user, id).await?;
        let text = SummaryText::new(title, content)?;
        Ok(self.summaries.update(id, &text).await?)
    }

    pub async fn delete(&self, user: &User, id: &SummaryId) -> Result<(), AppError> {
        self.get(user, id).await?;
        self.summaries.delete(id).await?;
        tracing::info!(summary_id = %id, "Summary deleted");
        Ok(())
    }

    /// Generate a summary from a material, counting against today's quota
    pub async fn generate_from_material(
        &self,
        user: &User,
        request: &GenerateSummary,
    ) -> Result<Summary, AppError> {
        let today = Utc::now().date_naive();
        let limit_reached = || {
            AppError::Domain(DomainError::QuotaExceeded(format!(
                "Daily limit of {} automatic summaries reached. Try again tomorrow",
                self.daily_limit
            )))
        };
        if !user.summary_quota.allows(today, self.daily_limit) {
            return Err(limit_reached());
        }

        let material = self
            .materials
            .find_by_id_and_user(&request.material_id, &user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Material", request.material_id))?;
        self.ensure_discipline(user, &request.discipline_id).await?;

        let content = match trim_optional(request.content.as_deref()) {
            Some(content) => content,
            None => {
                let text = self.extractor.extract_text(&material).await?;
                self.summarizer.summarize(&text, GENERATED_SUMMARY_WORDS)?
            }
        };
        let title = trim_optional(request.title.as_deref())
            .unwrap_or_else(|| format!("Summary - {}", material.original_name));
        let text = SummaryText::new(&title, &content)?;

        // The snapshot on `user` may be stale; the repository has the final say
        if !self
            .users
            .try_consume_quota(&user.id, QuotaKind::Summary, today, self.daily_limit)
            .await?
        {
            return Err(limit_reached());
        }

        let summary = self
            .summaries
            .create(&NewSummary {
                user_id: user.id,
                discipline_id: request.discipline_id,
                text,
                material_id: Some(material.id),
            })
            .await?;

        tracing::info!(
            summary_id = %summary.id,
            material_id = %material.id,
            "Summary generated from material"
        );
        Ok(summary)
    }
}
