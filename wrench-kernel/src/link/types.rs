//! Link identifiers and the per-link physical description.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A link's name, as it appears in the platform description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(String);

impl LinkId {
    /// Builds a link id from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The link's name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LinkId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Static physical description of a link: bandwidth and latency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Bandwidth, in bytes/second.
    pub bandwidth: f64,
    /// Latency, in seconds, added to every transmission before bandwidth
    /// is consulted.
    pub latency: f64,
}

impl LinkSpec {
    /// Builds a new link spec.
    pub fn new(bandwidth: f64, latency: f64) -> Self {
        Self { bandwidth, latency }
    }

    /// Transmission time, in virtual seconds, for `bytes` over this link
    /// alone (latency plus bandwidth-limited transfer time). Route-level
    /// transmission time sums this across every link on the path plus
    /// `default-control-message-size` framing (§6.4), computed by
    /// `wrench_kernel::mailbox`.
    pub fn transmission_time(&self, bytes: u64) -> f64 {
        self.latency + (bytes as f64) / self.bandwidth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_id_displays_as_its_name() {
        assert_eq!(LinkId::new("A-B").to_string(), "A-B");
    }

    #[test]
    fn transmission_time_combines_latency_and_bandwidth() {
        let link = LinkSpec::new(100.0, 0.5);
        assert_eq!(link.transmission_time(1000), 0.5 + 10.0);
    }
}
