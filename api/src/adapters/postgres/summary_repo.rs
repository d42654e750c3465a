//! PostgreSQL adapter for SummaryRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    DisciplineId, MaterialId, NewSummary, Summary, SummaryId, SummaryText, UserId,
};
use crate::domain::ports::SummaryRepository;
use crate::entity::summaries;
use crate::error::DomainError;

/// PostgreSQL implementation of SummaryRepository
pub struct PostgresSummaryRepository {
    db: DatabaseConnection,
}

impl PostgresSummaryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SummaryRepository for PostgresSummaryRepository {
    async fn create(&self, summary: &NewSummary) -> Result<Summary, DomainError> {
        let model = summaries::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(summary.user_id.0),
            discipline_id: Set(summary.discipline_id.0),
            title: Set(summary.text.title.clone()),
            content: Set(summary.text.content.clone()),
            material_id: Set(summary.material_id.map(|id| id.0)),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id_and_user(
        &self,
        id: &SummaryId,
        user_id: &UserId,
    ) -> Result<Option<Summary>, DomainError> {
        let result = summaries::Entity::find_by_id(id.0)
            .filter(summaries::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Summary>, DomainError> {
        let results = summaries::Entity::find()
            .filter(summaries::Column::UserId.eq(user_id.0))
            .order_by_desc(summaries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Summary>, DomainError> {
        let results = summaries::Entity::find()
            .filter(summaries::Column::DisciplineId.eq(discipline_id.0))
            .filter(summaries::Column::UserId.eq(user_id.0))
            .order_by_desc(summaries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: &SummaryId, text: &SummaryText) -> Result<Summary, DomainError> {
        let result = summaries::ActiveModel {
            id: Set(id.0),
            title: Set(text.title.clone()),
            content: Set(text.content.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Summary", id),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &SummaryId) -> Result<(), DomainError> {
        summaries::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_discipline(
        &self,
        discipline_id: &DisciplineId,
    ) -> Result<u64, DomainError> {
        let result = summaries::Entity::delete_many()
            .filter(summaries::Column::DisciplineId.eq(discipline_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        summaries::Entity::find()
            .filter(summaries::Column::UserId.eq(user_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<summaries::Model> for Summary {
    fn from(model: summaries::Model) -> Self {
        Summary {
            id: SummaryId(model.id),
            user_id: UserId(model.user_id),
            discipline_id: DisciplineId(model.discipline_id),
            title: model.title,
            content: model.content,
            material_id: model.material_id.map(MaterialId),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
