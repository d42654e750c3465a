//! PostgreSQL adapter for ConfirmationTokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::entities::{
    ConfirmationToken, ConfirmationTokenId, NewConfirmationToken, UserId,
};
use crate::domain::ports::ConfirmationTokenRepository;
use crate::entity::confirmation_tokens;
use crate::error::DomainError;

/// PostgreSQL implementation of ConfirmationTokenRepository
pub struct PostgresConfirmationTokenRepository {
    db: DatabaseConnection,
}

impl PostgresConfirmationTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfirmationTokenRepository for PostgresConfirmationTokenRepository {
    async fn create(
        &self,
        token: &NewConfirmationToken,
    ) -> Result<ConfirmationToken, DomainError> {
        let model = confirmation_tokens::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(token.user_id.0),
            token_hash: Set(token.token_hash.clone()),
            created_at: Set(Utc::now().fixed_offset()),
            expires_at: Set(token.expires_at.fixed_offset()),
            confirmed_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ConfirmationToken>, DomainError> {
        let result = confirmation_tokens::Entity::find()
            .filter(confirmation_tokens::Column::TokenHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn mark_confirmed(
        &self,
        id: &ConfirmationTokenId,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = confirmation_tokens::Entity::update_many()
            .col_expr(
                confirmation_tokens::Column::ConfirmedAt,
                Expr::value(at.fixed_offset()),
            )
            .filter(confirmation_tokens::Column::Id.eq(id.0))
            .filter(confirmation_tokens::Column::ConfirmedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }
}

/// Convert SeaORM model to domain entity
impl From<confirmation_tokens::Model> for ConfirmationToken {
    fn from(model: confirmation_tokens::Model) -> Self {
        ConfirmationToken {
            id: ConfirmationTokenId(model.id),
            user_id: UserId(model.user_id),
            token_hash: model.token_hash,
            expires_at: model.expires_at.with_timezone(&Utc),
            confirmed_at: model.confirmed_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}
