//! Process-wide constants.

/// Tenant stamped on every persisted observation set. Caller-supplied values are discarded.
pub const TENANT: &str = "tata";

/// Suffix appended to every storage key.
pub const STORAGE_KEY_SUFFIX: &str = ".json";

