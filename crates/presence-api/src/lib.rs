//! Presence intake API.
//!
//! Receives scan batches pushed by the wireless controller, answers the validator
//! handshake, and hands every batch to the ingest pipeline.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
