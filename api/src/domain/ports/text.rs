//! Text processing ports
//!
//! Extraction turns a stored material into plain text; summarization
//! condenses that text for automatic summaries.

use async_trait::async_trait;

use crate::domain::entities::Material;
use crate::error::DomainError;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the plain text of a stored material.
    ///
    /// Unreadable, corrupt or unsupported content yields `DomainError::Extraction`.
    async fn extract_text(&self, material: &Material) -> Result<String, DomainError>;
}

pub trait Summarizer: Send + Sync {
    /// Condense `text` to at most roughly `max_words` words
    fn summarize(&self, text: &str, max_words: usize) -> Result<String, DomainError>;
}
