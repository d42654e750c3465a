//! PostgreSQL adapter for MaterialRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{DisciplineId, Material, MaterialId, NewMaterial, UserId};
use crate::domain::ports::{MaterialRepository, Page};
use crate::entity::materials;
use crate::error::DomainError;

/// PostgreSQL implementation of MaterialRepository
pub struct PostgresMaterialRepository {
    db: DatabaseConnection,
}

impl PostgresMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaterialRepository for PostgresMaterialRepository {
    async fn create(&self, material: &NewMaterial) -> Result<Material, DomainError> {
        let model = materials::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(material.user_id.0),
            discipline_id: Set(material.discipline_id.0),
            original_name: Set(material.original_name.clone()),
            storage_name: Set(material.storage_name.clone()),
            content_type: Set(material.content_type.clone()),
            size: Set(material.size),
            uploaded_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id_and_user(
        &self,
        id: &MaterialId,
        user_id: &UserId,
    ) -> Result<Option<Material>, DomainError> {
        let result = materials::Entity::find_by_id(id.0)
            .filter(materials::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_by_discipline_and_user(
        &self,
        discipline_id: &DisciplineId,
        user_id: &UserId,
    ) -> Result<Vec<Material>, DomainError> {
        let results = materials::Entity::find()
            .filter(materials::Column::DisciplineId.eq(discipline_id.0))
            .filter(materials::Column::UserId.eq(user_id.0))
            .order_by_desc(materials::Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn page_by_discipline(
        &self,
        discipline_id: &DisciplineId,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Material>, DomainError> {
        let per_page = per_page.max(1);
        let paginator = materials::Entity::find()
            .filter(materials::Column::DisciplineId.eq(discipline_id.0))
            .order_by_desc(materials::Column::UploadedAt)
            .paginate(&self.db, per_page);

        let total_items = paginator
            .num_items()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let items = paginator
            .fetch_page(page)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Page::new(
            items.into_iter().map(|m| m.into()).collect(),
            page,
            per_page,
            total_items,
        ))
    }

    async fn find_recent_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
    ) -> Result<Vec<Material>, DomainError> {
        let results = materials::Entity::find()
            .filter(materials::Column::UserId.eq(user_id.0))
            .order_by_desc(materials::Column::UploadedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError> {
        materials::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_discipline(
        &self,
        discipline_id: &DisciplineId,
    ) -> Result<u64, DomainError> {
        let result = materials::Entity::delete_many()
            .filter(materials::Column::DisciplineId.eq(discipline_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        materials::Entity::find()
            .filter(materials::Column::UserId.eq(user_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<materials::Model> for Material {
    fn from(model: materials::Model) -> Self {
        Material {
            id: MaterialId(model.id),
            user_id: UserId(model.user_id),
            discipline_id: DisciplineId(model.discipline_id),
            original_name: model.original_name,
            storage_name: model.storage_name,
            content_type: model.content_type,
            size: model.size,
            uploaded_at: model.uploaded_at.with_timezone(&Utc),
        }
    }
}
