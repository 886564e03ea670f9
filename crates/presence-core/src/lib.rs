//! Presence Core Library
//!
//! This crate provides the scanning payload model, error types, configuration and
//! the clock abstraction shared by every Presence component.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, IngestConfig, IntakePolicy, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ClientObservationSet, Location, Observation, ScanEnvelope};
pub use storage_types::StorageBackend;
