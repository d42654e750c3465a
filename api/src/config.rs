use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Directory holding uploaded material files
    pub storage_root: PathBuf,
    pub port: u16,
    /// Automatic summaries a user may generate per day
    pub daily_summary_limit: i32,
    /// Feedback entries a user may send per day
    pub daily_feedback_limit: i32,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
    /// Address feedback notifications are addressed to
    pub feedback_inbox: String,
    /// Base URL of the web client, used in email-confirmation links
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            storage_root: env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| "./uploads".to_string())
                .into(),
            port: parse_or("PORT", 8080)?,
            daily_summary_limit: parse_or("DAILY_SUMMARY_LIMIT", 3)?,
            daily_feedback_limit: parse_or("DAILY_FEEDBACK_LIMIT", 2)?,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            feedback_inbox: env::var("FEEDBACK_INBOX")
                .unwrap_or_else(|_| "feedback@pdfocus.local".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset
fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
