//! Error types module
//!
//! `AppError` covers the errors the intake boundary can surface to the HTTP
//! caller. Startup and configuration failures are `anyhow` errors returned from
//! `main`. Per-job failures live in the worker crate because they never reach the
//! caller.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warning level - for recoverable issues like a saturated queue
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "QUEUE_FULL")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Job queue is full: no capacity after {waited_ms} ms")]
    QueueFull { waited_ms: u64 },

    #[error("Job queue is closed")]
    QueueClosed,
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::QueueFull { .. } | AppError::QueueClosed => 503,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::QueueFull { .. } => "QUEUE_FULL",
            AppError::QueueClosed => "QUEUE_CLOSED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, AppError::QueueFull { .. })
    }

    fn client_message(&self) -> String {
        match self {
            AppError::QueueFull { .. } => "Ingest queue is saturated, retry later".to_string(),
            AppError::QueueClosed => "Service is shutting down".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::QueueFull { .. } => LogLevel::Warn,
            AppError::QueueClosed => LogLevel::Error,
        }
    }
}
