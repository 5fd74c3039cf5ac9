//! Monitoring error types.

use thiserror::Error;

/// Errors that can occur during monitoring operations.
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// Error recording an event.
    #[error("failed to record event: {message}")]
    RecordError {
        /// Description of the recording failure.
        message: String,
    },

    /// Error generating a snapshot.
    #[error("failed to generate snapshot: {message}")]
    SnapshotError {
        /// Description of the snapshot failure.
        message: String,
    },

    /// Error resetting monitor state.
    #[error("failed to reset monitor: {message}")]
    ResetError {
        /// Description of the reset failure.
        message: String,
    },
}

impl MonitoringError {
    /// Build a [`MonitoringError::RecordError`].
    pub fn record(message: impl Into<String>) -> Self {
        Self::RecordError {
            message: message.into(),
        }
    }

    /// Build a [`MonitoringError::SnapshotError`].
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::SnapshotError {
            message: message.into(),
        }
    }

    /// Build a [`MonitoringError::ResetError`].
    pub fn reset(message: impl Into<String>) -> Self {
        Self::ResetError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_message_is_descriptive() {
        let err = MonitoringError::record("lock poisoned");
        assert!(err.to_string().contains("lock poisoned"));
    }

    #[test]
    fn snapshot_and_reset_errors_are_distinct() {
        let snap = MonitoringError::snapshot("x");
        let reset = MonitoringError::reset("x");
        assert_ne!(snap.to_string(), reset.to_string());
    }
}
