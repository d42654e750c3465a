//! Discipline service
//!
//! CRUD for a user's disciplines. Deleting a discipline also removes its
//! summaries and materials, stored files included.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    Discipline, DisciplineDetails, DisciplineId, Material, NewDiscipline, Summary, User,
};
use crate::domain::ports::{
    DisciplineRepository, MaterialRepository, MaterialStorage, Page, SummaryRepository,
};
use crate::error::{AppError, DomainError};

/// Largest page of materials returned with a discipline
pub const MAX_PER_PAGE: u64 = 100;

/// A discipline together with its content
#[derive(Debug, Clone, Serialize)]
pub struct DisciplineOverview {
    #[serde(flatten)]
    pub discipline: Discipline,
    pub summaries: Vec<Summary>,
    pub materials: Page<Material>,
}

/// Service for managing disciplines
pub struct DisciplineService<DR, SR, MR, MS>
where
    DR: DisciplineRepository,
    SR: SummaryRepository,
    MR: MaterialRepository,
    MS: MaterialStorage,
{
    disciplines: Arc<DR>,
    summaries: Arc<SR>,
    materials: Arc<MR>,
    storage: Arc<MS>,
}

impl<DR, SR, MR, MS> DisciplineService<DR, SR, MR, MS>
where
    DR: DisciplineRepository,
    SR: SummaryRepository,
    MR: MaterialRepository,
    MS: MaterialStorage,
{
    pub fn new(
        disciplines: Arc<DR>,
        summaries: Arc<SR>,
        materials: Arc<MR>,
        storage: Arc<MS>,
    ) -> Self {
        Self {
            disciplines,
            summaries,
            materials,
            storage,
        }
    }

    async fn owned(&self, user: &User, id: &DisciplineId) -> Result<Discipline, AppError> {
        self.disciplines
            .find_by_id_and_user(id, &user.id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::not_found("Discipline", id)))
    }

    pub async fn create(
        &self,
        user: &User,
        name: &str,
        description: Option<&str>,
    ) -> Result<Discipline, AppError> {
        let details = DisciplineDetails::new(name, description)?;
        let discipline = self
            .disciplines
            .create(&NewDiscipline {
                user_id: user.id,
                details,
            })
            .await?;

        tracing::info!(discipline_id = %discipline.id, user_id = %user.id, "Discipline created");
        Ok(discipline)
    }

    /// All of the user's disciplines, ordered by name
    pub async fn list(&self, user: &User) -> Result<Vec<Discipline>, AppError> {
        Ok(self.disciplines.list_by_user(&user.id).await?)
    }

    /// Discipline with all its summaries and one page of materials
    pub async fn get_overview(
        &self,
        user: &User,
        id: &DisciplineId,
        page: u64,
        per_page: u64,
    ) -> Result<DisciplineOverview, AppError> {
        let discipline = self.owned(user, id).await?;
        let summaries = self
            .summaries
            .list_by_discipline_and_user(id, &user.id)
            .await?;
        let materials = self
            .materials
            .page_by_discipline(id, page, per_page.clamp(1, MAX_PER_PAGE))
            .await?;

        Ok(DisciplineOverview {
            discipline,
            summaries,
            materials,
        })
    }

    pub async fn update(
        &self,
        user: &User,
        id: &DisciplineId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Discipline, AppError> {
        self.owned(user, id).await?;
        let details = DisciplineDetails::new(name, description)?;
        Ok(self.disciplines.update(id, &details).await?)
    }

    /// Delete a discipline with its stored files, summaries and material records
    ///
    /// Stored files go first: a storage failure leaves every record in place
    /// so the delete can be retried.
    pub async fn delete(&self, user: &User, id: &DisciplineId) -> Result<(), AppError> {
        self.owned(user, id).await?;

        let materials = self
            .materials
            .list_by_discipline_and_user(id, &user.id)
            .await?;
        for material in &materials {
            self.storage.delete(&material.storage_name).await?;
        }

        let removed_summaries = self.summaries.delete_by_discipline(id).await?;
        let removed_materials = self.materials.delete_by_discipline(id).await?;

        self.disciplines.delete(id).await?;

        tracing::info!(
            discipline_id = %id,
            summaries = removed_summaries,
            materials = removed_materials,
            "Discipline deleted"
        );
        Ok(())
    }
}
