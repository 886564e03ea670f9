//! Scanning API payloads as pushed by the access-point vendor.
//!
//! Decoding is deliberately lenient: every field may be absent or `null` and falls
//! back to its zero value, and unknown fields are ignored. A body only fails to
//! decode when it is not JSON or when a present field has the wrong JSON type.
//! Nothing beyond that is validated.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level scanning message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanEnvelope {
    /// Message kind, e.g. `DevicesSeen`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secret: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(rename = "data", default, deserialize_with = "null_as_default")]
    pub payload: ClientObservationSet,
}

impl ScanEnvelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Observations reported by one access point in one push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientObservationSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ap_mac: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ap_floors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ap_tags: Vec<String>,
    /// Vendor order is preserved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub observations: Vec<Observation>,
    /// Never trusted from input; overwritten before persistence.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tenant: String,
}

impl ClientObservationSet {
    /// Replace whatever tenant the caller sent.
    pub fn stamp_tenant(&mut self, tenant: &str) {
        self.tenant.clear();
        self.tenant.push_str(tenant);
    }
}

/// One client sighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv6: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seen_epoch: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seen_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rssi: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manufacturer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_mac: String,
}

/// Location estimate. `x`/`y` carry indoor positioning when the floor plan is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lng: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: Vec<f64>,
}
