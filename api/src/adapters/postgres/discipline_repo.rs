//! PostgreSQL adapter for DisciplineRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Discipline, DisciplineDetails, DisciplineId, NewDiscipline, UserId};
use crate::domain::ports::DisciplineRepository;
use crate::entity::disciplines;
use crate::error::DomainError;

/// PostgreSQL implementation of DisciplineRepository
pub struct PostgresDisciplineRepository {
    db: DatabaseConnection,
}

impl PostgresDisciplineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DisciplineRepository for PostgresDisciplineRepository {
    async fn create(&self, discipline: &NewDiscipline) -> Result<Discipline, DomainError> {
        let model = disciplines::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(discipline.user_id.0),
            name: Set(discipline.details.name.clone()),
            description: Set(discipline.details.description.clone()),
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
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Option<Discipline>, DomainError> {
        let result = disciplines::Entity::find_by_id(id.0)
            .filter(disciplines::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_for_user(
        &self,
        id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let count = disciplines::Entity::find_by_id(id.0)
            .filter(disciplines::Column::UserId.eq(user_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Discipline>, DomainError> {
        let results = disciplines::Entity::find()
            .filter(disciplines::Column::UserId.eq(user_id.0))
            .order_by_asc(disciplines::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: &DisciplineId,
        details: &DisciplineDetails,
    ) -> Result<Discipline, DomainError> {
        let result = disciplines::ActiveModel {
            id: Set(id.0),
            name: Set(details.name.clone()),
            description: Set(details.description.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Discipline", id),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &DisciplineId) -> Result<(), DomainError> {
        disciplines::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        disciplines::Entity::find()
            .filter(disciplines::Column::UserId.eq(user_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<disciplines::Model> for Discipline {
    fn from(model: disciplines::Model) -> Self {
        Discipline {
            id: DisciplineId(model.id),
            user_id: UserId(model.user_id),
            name: model.name,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
