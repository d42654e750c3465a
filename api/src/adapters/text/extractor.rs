//! Text extraction from stored materials
//!
//! Reads the material's bytes back through the storage port and turns them
//! into plain text. PDFs go through `pdf-extract` on a blocking thread since
//! parsing is CPU bound and the parser may panic on malformed input.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{file_extension, Material};
use crate::domain::ports::{MaterialStorage, TextExtractor};
use crate::error::DomainError;

/// Formats the extractor knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextFormat {
    Pdf,
    PlainText,
}

impl TextFormat {
    fn detect(material: &Material) -> Option<Self> {
        let content_type = material.content_type.to_ascii_lowercase();
        let extension = file_extension(&material.original_name).map(str::to_ascii_lowercase);

        match (content_type.as_str(), extension.as_deref()) {
            ("application/pdf", _) | (_, Some("pdf")) => Some(TextFormat::Pdf),
            (ct, _) if ct.starts_with("text/") => Some(TextFormat::PlainText),
            (_, Some("txt" | "md")) => Some(TextFormat::PlainText),
            _ => None,
        }
    }
}

/// TextExtractor backed by material storage
pub struct StoredMaterialTextExtractor<S: MaterialStorage> {
    storage: Arc<S>,
}

impl<S: MaterialStorage> StoredMaterialTextExtractor<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

async fn pdf_text(bytes: Vec<u8>, name: &str) -> Result<String, DomainError> {
    let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            DomainError::extraction_caused_by(format!("PDF parser crashed on {}", name), e)
        })?;

    parsed.map_err(|e| {
        DomainError::extraction(format!(
            "could not read {} (corrupted or encrypted PDF): {}",
            name, e
        ))
    })
}

#[async_trait]
impl<S: MaterialStorage + 'static> TextExtractor for StoredMaterialTextExtractor<S> {
    async fn extract_text(&self, material: &Material) -> Result<String, DomainError> {
        let format = TextFormat::detect(material).ok_or_else(|| {
            DomainError::extraction(format!(
                "unsupported file type for {} ({})",
                material.original_name, material.content_type
            ))
        })?;

        let bytes = self
            .storage
            .load(&material.storage_name)
            .await
            .map_err(|e| {
                DomainError::extraction_caused_by(
                    format!("could not load {}", material.original_name),
                    e,
                )
            })?;

        let text = match format {
            TextFormat::Pdf => pdf_text(bytes, &material.original_name).await?,
            TextFormat::PlainText => String::from_utf8(bytes).map_err(|e| {
                DomainError::extraction_caused_by(
                    format!("{} is not valid UTF-8 text", material.original_name),
                    e,
                )
            })?,
        };

        if text.trim().is_empty() {
            return Err(DomainError::extraction(format!(
                "no readable text in {}",
                material.original_name
            )));
        }

        tracing::debug!(
            material_id = %material.id,
            format = ?format,
            chars = text.chars().count(),
            "Text extracted"
        );

        Ok(text)
    }
}
