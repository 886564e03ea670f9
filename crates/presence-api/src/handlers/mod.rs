pub mod scan;
pub mod stats;

pub use scan::{ingest_scan, not_found, validator};
pub use stats::pipeline_stats;
