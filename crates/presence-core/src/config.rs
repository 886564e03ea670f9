//! Configuration module
//!
//! Configuration is read once at startup, validated, and then shared read-only
//! (`Arc<Config>`) with the intake gate, the worker pool and the storage factory.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_QUEUE_SIZE: usize = 100;
const MAX_WORKERS: usize = 5;
const MAX_BODY_SIZE_MB: usize = 10;
const DEFAULT_REGION: &str = "us-east-1";

/// How the intake gate hands a job to the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntakePolicy {
    /// Enqueue from a detached task and answer immediately. A full queue parks the
    /// detached task until a worker frees capacity; nothing is rejected.
    Detached,
    /// Wait up to `timeout` for capacity and reject the request if none frees up.
    Bounded { timeout: Duration },
}

/// Log line format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                other
            )),
        }
    }
}

/// Ingest service configuration.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub max_body_size_bytes: usize,
    // Pipeline
    pub max_queue_size: usize,
    pub max_workers: usize,
    pub intake_policy: IntakePolicy,
    // Scanning API handshake
    pub secret: String,
    pub validator: String,
    pub time_zone: Tz,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IngestConfig>);

impl Config {
    fn inner(&self) -> &IngestConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = IngestConfig::from_source(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().log_format
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.inner().max_body_size_bytes
    }

    pub fn max_queue_size(&self) -> usize {
        self.inner().max_queue_size
    }

    pub fn max_workers(&self) -> usize {
        self.inner().max_workers
    }

    pub fn intake_policy(&self) -> IntakePolicy {
        self.inner().intake_policy
    }

    pub fn secret(&self) -> &str {
        &self.inner().secret
    }

    pub fn validator(&self) -> &str {
        &self.inner().validator
    }

    pub fn time_zone(&self) -> Tz {
        self.inner().time_zone
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.inner().s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.inner().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, anyhow::Error> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
        _ => Ok(default),
    }
}

impl IngestConfig {
    /// Build the configuration from any key/value source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let time_zone_name = lookup("TIME_ZONE").unwrap_or_else(|| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("TIME_ZONE '{}' is not a known time zone", time_zone_name))?;

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::S3,
        };

        let timeout_ms: u64 = parse_or(&lookup, "INTAKE_ENQUEUE_TIMEOUT_MS", 0)?;
        let intake_policy = if timeout_ms == 0 {
            IntakePolicy::Detached
        } else {
            IntakePolicy::Bounded {
                timeout: Duration::from_millis(timeout_ms),
            }
        };

        let max_body_size_mb: usize = parse_or(&lookup, "MAX_BODY_SIZE_MB", MAX_BODY_SIZE_MB)?;
        let max_body_size_bytes = max_body_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_BODY_SIZE_MB is too large: {}", max_body_size_mb))?;

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let config = IngestConfig {
            server_port: parse_or(&lookup, "PORT", SERVER_PORT)?,
            environment,
            log_format,
            max_body_size_bytes,
            max_queue_size: parse_or(&lookup, "MAX_QUEUE_SIZE", MAX_QUEUE_SIZE)?,
            max_workers: parse_or(&lookup, "MAX_WORKERS", MAX_WORKERS)?,
            intake_policy,
            secret: lookup("SCANNER_SECRET")
                .ok_or_else(|| anyhow::anyhow!("SCANNER_SECRET must be set"))?,
            validator: lookup("SCANNER_VALIDATOR")
                .ok_or_else(|| anyhow::anyhow!("SCANNER_VALIDATOR must be set"))?,
            time_zone,
            storage_backend,
            s3_bucket: lookup("S3_BUCKET")
                .ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?,
            s3_region: lookup("S3_REGION")
                .or_else(|| lookup("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_queue_size == 0 {
            anyhow::bail!("MAX_QUEUE_SIZE must be at least 1");
        }
        if self.max_workers == 0 {
            anyhow::bail!("MAX_WORKERS must be at least 1");
        }
        if self.max_body_size_bytes == 0 {
            anyhow::bail!("MAX_BODY_SIZE_MB must be at least 1");
        }
        if self.secret.is_empty() {
            anyhow::bail!("SCANNER_SECRET must not be empty");
        }
        if self.s3_bucket.trim().is_empty() {
            anyhow::bail!("S3_BUCKET must not be empty");
        }
        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            anyhow::bail!("LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local");
        }
        Ok(())
    }
}
