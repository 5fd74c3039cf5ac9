//! Host identifiers and the per-host physical description.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host's name, as it appears in the platform description and in every
/// trace/log line that mentions it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostId(String);

impl HostId {
    /// Builds a host id from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The host's name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HostId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Static physical description of a host, as ingested from the platform
/// description (§6.1): core count, flop rate, and RAM capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSpec {
    /// Number of cores available for compute dispatch.
    pub cores: u32,
    /// Flop rate, in flops/second, used to scale `compute(flops)`.
    pub flop_rate: f64,
    /// Total RAM capacity, in bytes.
    pub ram_capacity: u64,
}

impl HostSpec {
    /// Builds a new host spec. Panics are never raised here; validation
    /// of nonsensical values (zero cores, non-finite flop rate) is the
    /// platform ingestion layer's job, not this plain data type's.
    pub fn new(cores: u32, flop_rate: f64, ram_capacity: u64) -> Self {
        Self {
            cores,
            flop_rate,
            ram_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_id_displays_as_its_name() {
        let id = HostId::new("StableHost");
        assert_eq!(id.to_string(), "StableHost");
        assert_eq!(id.as_str(), "StableHost");
    }

    #[test]
    fn host_id_from_str_and_string_agree() {
        assert_eq!(HostId::from("A"), HostId::from("A".to_string()));
    }
}
