//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{DailyQuota, NewUser, QuotaKind, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn update_error(id: &UserId, e: DbErr) -> DomainError {
    match e {
        DbErr::RecordNotUpdated => DomainError::not_found("User", id),
        e => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            email_confirmed: Set(false),
            password_hash: Set(user.password_hash.clone()),
            api_key_hash: Set(user.api_key_hash.clone()),
            created_at: Set(Utc::now().fixed_offset()),
            feedbacks_today: Set(0),
            last_feedback_on: Set(None),
            summaries_today: Set(0),
            last_summary_on: Set(None),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::Conflict(format!("Email '{}' is already registered", user.email))
            }
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn try_consume_quota(
        &self,
        id: &UserId,
        kind: QuotaKind,
        today: NaiveDate,
        limit: i32,
    ) -> Result<bool, DomainError> {
        let (count, day) = match kind {
            QuotaKind::Feedback => (users::Column::FeedbacksToday, users::Column::LastFeedbackOn),
            QuotaKind::Summary => (users::Column::SummariesToday, users::Column::LastSummaryOn),
        };

        // Both SET expressions read the row as it was before the update
        let result = users::Entity::update_many()
            .col_expr(
                count,
                Expr::case(Expr::col(day).eq(today), Expr::col(count).add(1))
                    .finally(1)
                    .into(),
            )
            .col_expr(day, Expr::value(today))
            .filter(users::Column::Id.eq(id.0))
            .filter(
                Condition::any()
                    .add(day.is_null())
                    .add(day.ne(today))
                    .add(count.lt(limit)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(
            user_id = %id,
            quota = %kind,
            consumed = result.rows_affected == 1,
            "Daily quota checked"
        );
        Ok(result.rows_affected == 1)
    }

    async fn set_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            api_key_hash: Set(hash.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(id, e))?;

        Ok(())
    }

    async fn mark_email_confirmed(&self, id: &UserId) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            email_confirmed: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_error(id, e))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            name: model.name,
            email: model.email,
            email_confirmed: model.email_confirmed,
            password_hash: model.password_hash,
            api_key_hash: model.api_key_hash,
            created_at: model.created_at.with_timezone(&Utc),
            feedback_quota: DailyQuota {
                used: model.feedbacks_today,
                day: model.last_feedback_on,
            },
            summary_quota: DailyQuota {
                used: model.summaries_today,
                day: model.last_summary_on,
            },
        }
    }
}
