//! Serialization helpers for common non-serde-native types.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde module for `Duration` as whole seconds, for config/event structs
/// that need to derive `Serialize`/`Deserialize` but carry a `Duration`
/// field (e.g. a monitoring snapshot interval).
pub mod duration_serde {
    use super::*;

    /// Serializes `Duration` as seconds (u64).
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    /// Deserializes `Duration` from seconds (u64).
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Wrapper {
        #[serde(with = "duration_serde")]
        duration: Duration,
    }

    #[test]
    fn duration_serde_roundtrip() {
        let original = Wrapper {
            duration: Duration::from_secs(60),
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("60"));
        let deserialized: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }
}
