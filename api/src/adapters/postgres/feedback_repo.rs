//! PostgreSQL adapter for FeedbackRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};

use crate::domain::entities::{Feedback, FeedbackId, FeedbackKind, NewFeedback, UserId};
use crate::domain::ports::FeedbackRepository;
use crate::entity::feedback;
use crate::error::DomainError;

/// PostgreSQL implementation of FeedbackRepository
pub struct PostgresFeedbackRepository {
    db: DatabaseConnection,
}

impl PostgresFeedbackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn create(&self, entry: &NewFeedback) -> Result<Feedback, DomainError> {
        let model = feedback::ActiveModel {
            id: NotSet,
            user_id: Set(entry.user_id.0),
            kind: Set(entry.kind.to_string()),
            rating: Set(entry.rating),
            message: Set(entry.message.clone()),
            email: Set(entry.email.clone()),
            page: Set(entry.page.clone()),
            user_agent: Set(entry.user_agent.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError> {
        let result = feedback::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<feedback::Model> for Feedback {
    fn from(model: feedback::Model) -> Self {
        Feedback {
            id: FeedbackId(model.id),
            user_id: UserId(model.user_id),
            kind: model.kind.parse().unwrap_or(FeedbackKind::Other),
            rating: model.rating,
            message: model.message,
            email: model.email,
            page: model.page,
            user_agent: model.user_agent,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
