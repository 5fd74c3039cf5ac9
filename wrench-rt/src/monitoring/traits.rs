//! Core monitoring traits for universal event observation.

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

// Layer 3: Internal module imports
use super::error::MonitoringError;
use super::types::MonitoringSnapshot;

/// Event severity levels, ordered from lowest to highest for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventSeverity {
    /// Fine-grained tracing (e.g. every mailbox enqueue).
    Trace,
    /// Development-time detail.
    Debug,
    /// Normal operational events.
    Info,
    /// Potential issues that did not stop anything.
    Warning,
    /// Failures.
    Error,
    /// System-level failures (e.g. a service exhausting its restart budget).
    Critical,
}

/// Trait for event types that can be recorded by a [`Monitor`].
///
/// # Example
/// ```rust
/// use wrench_rt::monitoring::{EventSeverity, MonitoringEvent};
/// use chrono::{DateTime, Utc};
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, Serialize)]
/// struct MyEvent {
///     timestamp: DateTime<Utc>,
/// }
///
/// impl MonitoringEvent for MyEvent {
///     const EVENT_TYPE: &'static str = "my_event";
///     fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
///     fn severity(&self) -> EventSeverity { EventSeverity::Info }
/// }
/// ```
pub trait MonitoringEvent: Send + Sync + Clone + Debug + Serialize + 'static {
    /// Static event-type identifier, used for categorization.
    const EVENT_TYPE: &'static str;

    /// When the event occurred, on the virtual-clock-correlated wall clock.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Severity of the event.
    fn severity(&self) -> EventSeverity;
}

/// Generic interface for observing and tracking events.
#[async_trait]
pub trait Monitor<E: MonitoringEvent>: Send + Sync + Clone {
    /// Record an event, subject to the monitor's enable flag and severity
    /// filter.
    async fn record(&self, event: E) -> Result<(), MonitoringError>;

    /// Snapshot of counters and recent history.
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError>;

    /// Clear counters and history.
    async fn reset(&self) -> Result<(), MonitoringError>;
}
