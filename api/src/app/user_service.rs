//! User service
//!
//! Handles registration, password login, email confirmation and API key
//! authentication.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::auth::password::{self, PasswordParams};
use crate::domain::entities::{
    normalize_email, validate_password, NewConfirmationToken, NewUser, User, UserId,
};
use crate::domain::ports::{AccountNotifier, ConfirmationTokenRepository, UserRepository};
use crate::error::{AppError, DomainError};

const INVALID_TOKEN: &str = "Token is invalid, expired or already used";

/// Service for managing users
pub struct UserService<UR, TR, AN>
where
    UR: UserRepository,
    TR: ConfirmationTokenRepository,
    AN: AccountNotifier,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    notifier: Arc<AN>,
    password_params: PasswordParams,
}

impl<UR, TR, AN> UserService<UR, TR, AN>
where
    UR: UserRepository,
    TR: ConfirmationTokenRepository,
    AN: AccountNotifier,
{
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, notifier: Arc<AN>) -> Self {
        Self {
            users,
            tokens,
            notifier,
            password_params: PasswordParams::default(),
        }
    }

    /// Register a new user and send the email-confirmation message
    ///
    /// Returns (user, api_key) - the key is only shown once, only its hash is stored
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        validate_password(password)?;
        let api_key = generate_api_key();
        let password_hash = self.hash_password(password).await?;
        let new_user = NewUser::new(name, email, password_hash, hash_api_key(&api_key))?;

        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Email '{}' is already registered",
                new_user.email
            ))));
        }

        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        self.send_confirmation(&user).await;

        Ok((user, api_key))
    }

    /// Check email and password, then issue a fresh API key
    ///
    /// The new key replaces the previous one. Unknown emails and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let email = normalize_email(email).map_err(|_| AppError::Unauthorized)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.password_hash.is_empty() || !self.verify_password(password, &user).await? {
            tracing::debug!(user_id = %user.id, "Login rejected");
            return Err(AppError::Unauthorized);
        }

        let (user, api_key) = self.rotate_api_key(user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user, api_key))
    }

    /// Consume a confirmation token, confirm the email and issue a fresh API key
    pub async fn confirm_email(&self, token: &str) -> Result<(User, String), AppError> {
        let invalid = || AppError::Domain(DomainError::Validation(INVALID_TOKEN.to_string()));
        let now = Utc::now();

        let stored = self
            .tokens
            .find_by_token_hash(&sha256_hex(token.trim()))
            .await?
            .filter(|t| t.is_usable(now))
            .ok_or_else(invalid)?;

        if !self.tokens.mark_confirmed(&stored.id, now).await? {
            return Err(invalid());
        }
        self.users.mark_email_confirmed(&stored.user_id).await?;

        let user = self.find_by_id(&stored.user_id).await?;
        let (user, api_key) = self.rotate_api_key(user).await?;
        tracing::info!(user_id = %user.id, "Email confirmed");
        Ok((user, api_key))
    }

    /// Resolve a raw API key to its user
    pub async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(&hash_api_key(api_key)).await?)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::not_found("User", id)))
    }

    async fn rotate_api_key(&self, user: User) -> Result<(User, String), AppError> {
        let api_key = generate_api_key();
        let api_key_hash = hash_api_key(&api_key);
        self.users.set_api_key_hash(&user.id, &api_key_hash).await?;

        Ok((User { api_key_hash, ..user }, api_key))
    }

    /// Store a new confirmation token and email it. Failures are logged only.
    async fn send_confirmation(&self, user: &User) {
        let token = generate_confirmation_token();
        let issued = NewConfirmationToken::issued_at(user.id, sha256_hex(&token), Utc::now());

        if let Err(e) = self.tokens.create(&issued).await {
            tracing::warn!(error = %e, user_id = %user.id, "Failed to store confirmation token");
            return;
        }
        if let Err(e) = self.notifier.send_confirmation(user, &token).await {
            tracing::warn!(error = %e, user_id = %user.id, "Failed to send confirmation email");
        }
    }

    async fn hash_password(&self, raw: &str) -> Result<String, DomainError> {
        let raw = raw.to_string();
        let params = self.password_params;
        tokio::task::spawn_blocking(move || password::hash_password(&raw, params))
            .await
            .map_err(|e| DomainError::Internal(format!("password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, raw: &str, user: &User) -> Result<bool, DomainError> {
        let raw = raw.to_string();
        let hash = user.password_hash.clone();
        tokio::task::spawn_blocking(move || password::verify_password(&raw, &hash))
            .await
            .map_err(|e| DomainError::Internal(format!("password check task failed: {}", e)))?
    }
}

#[cfg(test)]
impl<UR, TR, AN> UserService<UR, TR, AN>
where
    UR: UserRepository,
    TR: ConfirmationTokenRepository,
    AN: AccountNotifier,
{
    pub fn with_password_params(mut self, params: PasswordParams) -> Self {
        self.password_params = params;
        self
    }
}

fn random_hex(bytes: usize) -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..bytes).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Generate a random API key
fn generate_api_key() -> String {
    format!("pk-{}", random_hex(32))
}

/// Generate the raw token mailed for email confirmation
fn generate_confirmation_token() -> String {
    random_hex(32)
}

fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    sha256_hex(api_key)
}
