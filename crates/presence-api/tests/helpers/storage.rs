use async_trait::async_trait;
use bytes::Bytes;
use presence_core::StorageBackend;
use presence_storage::{Storage, StorageError, StorageResult};

/// Backend whose health probe always fails; puts fail too.
pub struct UnreachableStorage;

#[async_trait]
impl Storage for UnreachableStorage {
    async fn put_object(&self, _bucket: &str, _key: &str, _data: Bytes) -> StorageResult<()> {
        Err(StorageError::BackendError("connection refused".to_string()))
    }

    async fn health_check(&self) -> StorageResult<()> {
        Err(StorageError::BackendError("connection refused".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
