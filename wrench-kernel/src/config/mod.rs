//! Kernel-level configuration flags (§6.4): simulated failure-fabric
//! toggles and the default control-message size used when a message
//! doesn't carry its own `payload_bytes()`.

use thiserror::Error;

/// Fails fast, at construction, the same way
/// `airssys_osl::framework::config::OSLConfig` validates `SecurityConfig`
/// before the framework is allowed to start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelConfigError {
    /// A configuration value was not acceptable.
    #[error("invalid kernel configuration: {reason}")]
    InvalidArgument {
        /// Human-readable explanation.
        reason: String,
    },
}

/// Runtime configuration for the kernel adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelConfig {
    /// Whether host switchers (scheduled or random-repeat) are active for
    /// this run. Disabling this is useful for scenarios that want a
    /// platform description's hosts to simply stay up.
    pub host_shutdown_simulation: bool,

    /// Whether link switchers are active for this run.
    pub link_shutdown_simulation: bool,

    /// Bytes assumed for a message's transmission-time modelling when its
    /// `Message::payload_bytes()` is `0` and no payload-map override is
    /// supplied by the sending service.
    pub default_control_message_size: u64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            host_shutdown_simulation: true,
            link_shutdown_simulation: true,
            default_control_message_size: 1024,
        }
    }
}

impl KernelConfig {
    fn validate(&self) -> Result<(), KernelConfigError> {
        if self.default_control_message_size == 0 {
            return Err(KernelConfigError::InvalidArgument {
                reason: "default_control_message_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Fluent builder for [`KernelConfig`], validated on [`KernelConfigBuilder::build`].
#[derive(Debug, Default)]
pub struct KernelConfigBuilder {
    host_shutdown_simulation: Option<bool>,
    link_shutdown_simulation: Option<bool>,
    default_control_message_size: Option<u64>,
}

impl KernelConfigBuilder {
    /// Creates a builder with every field unset (defaults applied at `build`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `host_shutdown_simulation`.
    pub fn host_shutdown_simulation(mut self, enabled: bool) -> Self {
        self.host_shutdown_simulation = Some(enabled);
        self
    }

    /// Sets `link_shutdown_simulation`.
    pub fn link_shutdown_simulation(mut self, enabled: bool) -> Self {
        self.link_shutdown_simulation = Some(enabled);
        self
    }

    /// Sets `default_control_message_size`.
    pub fn default_control_message_size(mut self, bytes: u64) -> Self {
        self.default_control_message_size = Some(bytes);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<KernelConfig, KernelConfigError> {
        let defaults = KernelConfig::default();
        let config = KernelConfig {
            host_shutdown_simulation: self
                .host_shutdown_simulation
                .unwrap_or(defaults.host_shutdown_simulation),
            link_shutdown_simulation: self
                .link_shutdown_simulation
                .unwrap_or(defaults.link_shutdown_simulation),
            default_control_message_size: self
                .default_control_message_size
                .unwrap_or(defaults.default_control_message_size),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(KernelConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_applies_defaults_for_unset_fields() {
        let config = KernelConfigBuilder::new().build().unwrap();
        assert_eq!(config, KernelConfig::default());
    }

    #[test]
    fn builder_overrides_are_applied() {
        let config = KernelConfigBuilder::new()
            .host_shutdown_simulation(false)
            .default_control_message_size(2048)
            .build()
            .unwrap();
        assert!(!config.host_shutdown_simulation);
        assert_eq!(config.default_control_message_size, 2048);
    }

    #[test]
    fn zero_control_message_size_is_rejected() {
        let err = KernelConfigBuilder::new()
            .default_control_message_size(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, KernelConfigError::InvalidArgument { .. }));
    }
}
