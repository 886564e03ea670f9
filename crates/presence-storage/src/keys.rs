//! Storage key derivation.
//!
//! Key format: `<RFC3339 timestamp>-<apMac>.json`. The timestamp has second
//! precision, is rendered in the configured zone and uses `Z` for a zero offset.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use presence_core::constants::STORAGE_KEY_SUFFIX;

/// Build the object key for a batch from access point `ap_mac` arriving at `now`.
pub fn storage_key(now: DateTime<Utc>, time_zone: Tz, ap_mac: &str) -> String {
    let stamp = now
        .with_timezone(&time_zone)
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    format!("{}-{}{}", stamp, ap_mac, STORAGE_KEY_SUFFIX)
}
