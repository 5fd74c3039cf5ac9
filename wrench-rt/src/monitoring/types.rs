//! Monitoring event types and configuration structures.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::Serialize;

// Layer 3: Internal module imports
use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorId;

/// Configuration for monitoring behaviour.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled at all.
    pub enabled: bool,

    /// Maximum number of events retained in the in-memory ring buffer.
    pub max_history_size: usize,

    /// Minimum severity recorded; events below this are dropped.
    pub severity_filter: EventSeverity,

    /// Interval a background snapshot task (if any) should poll at. Not
    /// enforced by [`super::InMemoryMonitor`] itself.
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Point-in-time snapshot of a monitor's counters and recent history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Total events recorded since the last reset.
    pub total_events: u64,
    /// Trace-level event count.
    pub trace_count: u64,
    /// Debug-level event count.
    pub debug_count: u64,
    /// Info-level event count.
    pub info_count: u64,
    /// Warning-level event count.
    pub warning_count: u64,
    /// Error-level event count.
    pub error_count: u64,
    /// Critical-level event count.
    pub critical_count: u64,
    /// Most recent events, bounded by `max_history_size`.
    pub recent_events: Vec<E>,
}

/// Events related to a service's lifecycle: start, stop, suspend, resume,
/// restart, crash.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The service actor this event concerns.
    pub actor_id: ActorId,
    /// What happened.
    pub event_kind: ServiceEventKind,
    /// Free-form key/value metadata (host name, job id, etc).
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ServiceEvent {
    const EVENT_TYPE: &'static str = "service";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ServiceEventKind::Started => EventSeverity::Info,
            ServiceEventKind::Stopped => EventSeverity::Info,
            ServiceEventKind::Suspended => EventSeverity::Info,
            ServiceEventKind::Resumed => EventSeverity::Info,
            ServiceEventKind::Restarted { .. } => EventSeverity::Warning,
            ServiceEventKind::Crashed { .. } => EventSeverity::Error,
            ServiceEventKind::RestartBudgetExhausted { .. } => EventSeverity::Critical,
        }
    }
}

/// Specific kinds of service lifecycle events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServiceEventKind {
    /// The service transitioned `Down -> Up` for the first time.
    Started,
    /// The service transitioned to `Down` through a graceful stop or kill.
    Stopped,
    /// The service transitioned `Up -> Suspended`.
    Suspended,
    /// The service transitioned `Suspended -> Up`.
    Resumed,
    /// The service was automatically restarted after a crash.
    Restarted {
        /// Restart count after this restart.
        restart_count: u32,
    },
    /// The service's actor task ended abnormally.
    Crashed {
        /// Description of the failure, if known.
        reason: String,
    },
    /// The service exceeded its autorestart budget and will not be
    /// restarted again.
    RestartBudgetExhausted {
        /// Number of restarts attempted.
        restart_count: u32,
    },
}

/// Events related to mailbox backpressure, independent of any particular
/// service.
#[derive(Debug, Clone, Serialize)]
pub struct MailboxEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The actor owning the mailbox.
    pub actor_id: ActorId,
    /// What happened.
    pub event_kind: MailboxEventKind,
}

impl MonitoringEvent for MailboxEvent {
    const EVENT_TYPE: &'static str = "mailbox";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            MailboxEventKind::CapacityReached => EventSeverity::Warning,
            MailboxEventKind::MessageDropped { .. } => EventSeverity::Error,
        }
    }
}

/// Specific kinds of mailbox events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MailboxEventKind {
    /// A `try_send` found the mailbox at capacity.
    CapacityReached,
    /// A message could not be delivered at all (mailbox closed).
    MessageDropped {
        /// Why the message was dropped.
        reason: String,
    },
}
