//! Material storage port
//!
//! Keeps the bytes of uploaded materials, keyed by a generated storage name,
//! independently of the physical medium (local disk, object store, ...).
//!
//! Contract:
//! - `save` persists the whole stream under the name. An existing entry is
//!   replaced and no partially written entry is ever visible under the name.
//! - `delete` is idempotent: removing a name that holds nothing succeeds.
//! - I/O problems surface as `DomainError::Storage` with the cause attached.

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncRead;

use crate::error::DomainError;

/// Readable byte stream handed to storage. `save` takes ownership and drops
/// it on every exit path. The lifetime lets a stream borrow its source, such
/// as a multipart request body.
pub type ByteStream<'a> = Box<dyn AsyncRead + Send + Unpin + 'a>;

/// Wrap an in-memory buffer as a `ByteStream`
pub fn byte_stream(bytes: impl Into<Vec<u8>>) -> ByteStream<'static> {
    Box::new(std::io::Cursor::new(bytes.into()))
}

/// Where a saved material ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredLocation {
    /// Absolute reference usable for later retrieval (path or URI)
    pub location: String,
    pub bytes_written: u64,
}

#[async_trait]
pub trait MaterialStorage: Send + Sync {
    /// Persist `content` under `storage_name`, replacing any previous content
    async fn save(
        &self,
        storage_name: &str,
        content: ByteStream<'_>,
    ) -> Result<StoredLocation, DomainError>;

    /// Read back everything stored under `storage_name`
    async fn load(&self, storage_name: &str) -> Result<Vec<u8>, DomainError>;

    /// Remove the entry if present
    async fn delete(&self, storage_name: &str) -> Result<(), DomainError>;
}
