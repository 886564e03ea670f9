//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The ingest pipeline only ever writes: one `put_object` per accepted batch. There
/// is no retry, multipart handling or content-type negotiation at this layer;
/// failures are returned to the worker, which decides what to do with them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key` in `bucket`, replacing any existing object.
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> StorageResult<()>;

    /// Cheap reachability probe used by the health endpoint.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
