//! Scanning API payload model.

mod scan;

pub use scan::{ClientObservationSet, Location, Observation, ScanEnvelope};
