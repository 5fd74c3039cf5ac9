//! Generic event monitoring: severity-filtered, history-bounded recording
//! of service lifecycle and mailbox events, usable by anything that holds a
//! `Monitor<E>` handle (services, the kernel adapter, test harnesses).

mod error;
mod in_memory;
mod noop;
mod traits;
mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    MailboxEvent, MailboxEventKind, MonitoringConfig, MonitoringSnapshot, ServiceEvent,
    ServiceEventKind,
};
