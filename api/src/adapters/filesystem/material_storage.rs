//! Local filesystem adapter for MaterialStorage
//!
//! Files live directly under a root directory fixed at construction. Writes
//! go to a hidden temporary sibling first and are renamed into place, so a
//! reader never sees a half-written file under the final name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::ports::{ByteStream, MaterialStorage, StoredLocation};
use crate::error::DomainError;

/// Stores materials as plain files under `root`
pub struct LocalMaterialStorage {
    root: PathBuf,
}

impl LocalMaterialStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, storage_name: &str) -> Result<PathBuf, DomainError> {
        validate_storage_name(storage_name)?;
        Ok(self.root.join(storage_name))
    }

    /// Fixed-length temporary name, independent of the final name's length
    fn temp_path(&self) -> PathBuf {
        self.root
            .join(format!(".tmp.{}", Uuid::new_v4().simple()))
    }
}

/// Storage names are single path components: no separators, no `..`
fn validate_storage_name(storage_name: &str) -> Result<(), DomainError> {
    if storage_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "Storage name is required".to_string(),
        ));
    }
    if storage_name.contains(['/', '\\', '\0']) || storage_name.contains("..") {
        return Err(DomainError::Validation(format!(
            "Invalid storage name '{}'",
            storage_name
        )));
    }
    Ok(())
}

/// Copy the whole stream into a new file and flush it to disk
async fn write_stream(path: &Path, content: &mut ByteStream<'_>) -> std::io::Result<u64> {
    let mut file = fs::File::create(path).await?;
    let written = tokio::io::copy(content, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

async fn discard_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove temporary upload");
        }
    }
}

#[async_trait]
impl MaterialStorage for LocalMaterialStorage {
    async fn save(
        &self,
        storage_name: &str,
        mut content: ByteStream<'_>,
    ) -> Result<StoredLocation, DomainError> {
        let destination = self.resolve(storage_name)?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            DomainError::storage(
                format!(
                    "could not create storage directory {}",
                    self.root.display()
                ),
                e,
            )
        })?;

        let temp = self.temp_path();
        let written = match write_stream(&temp, &mut content).await {
            Ok(written) => written,
            Err(e) => {
                discard_temp(&temp).await;
                return Err(DomainError::storage(
                    format!("could not write {}", storage_name),
                    e,
                ));
            }
        };
        drop(content);

        if let Err(e) = fs::rename(&temp, &destination).await {
            discard_temp(&temp).await;
            return Err(DomainError::storage(
                format!("could not move {} into place", storage_name),
                e,
            ));
        }

        let absolute = fs::canonicalize(&destination).await.map_err(|e| {
            DomainError::storage(format!("could not resolve {}", storage_name), e)
        })?;

        tracing::debug!(
            storage_name = %storage_name,
            bytes = written,
            path = %absolute.display(),
            "Material stored"
        );

        Ok(StoredLocation {
            location: absolute.to_string_lossy().into_owned(),
            bytes_written: written,
        })
    }

    async fn load(&self, storage_name: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.resolve(storage_name)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DomainError::not_found("Stored file", storage_name))
            }
            Err(e) => Err(DomainError::storage(
                format!("could not read {}", storage_name),
                e,
            )),
        }
    }

    async fn delete(&self, storage_name: &str) -> Result<(), DomainError> {
        let path = self.resolve(storage_name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(storage_name = %storage_name, "Material removed from storage");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage(
                format!("could not delete {}", storage_name),
                e,
            )),
        }
    }
}
