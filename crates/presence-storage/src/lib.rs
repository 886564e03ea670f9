//! Presence Storage Library
//!
//! This crate is the storage sink of the ingest pipeline: the [`Storage`] trait with
//! its single `put_object` write, the S3 and local filesystem backends, and the
//! derivation of object keys.
//!
//! # Storage key format
//!
//! `<RFC3339 timestamp in the configured zone>-<apMac>.json`, e.g.
//! `2024-01-01T00:00:00Z-aa:bb:cc:dd:ee:ff.json`. Two pushes from the same access
//! point within one second share a key and the later write wins.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use presence_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
