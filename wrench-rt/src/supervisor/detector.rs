//! Termination detection: a lightweight watcher task that joins a victim's
//! actor task and reports exactly one outcome to a report mailbox.
//!
//! Directly modelled on `ServiceTerminationDetector` (original_source): that
//! helper service joins the monitored service and, depending on whether the
//! join returned cleanly or the service vanished without returning, emits a
//! `ServiceHasCrashedMessage` or `ServiceHasTerminatedMessage` to a mailbox.
//! Here the "service" is a `tokio::task::JoinHandle`, and join outcomes map
//! the same way: `Err` (the task panicked, or was aborted because its host
//! went OFF) is a crash, `Ok` is a clean termination carrying a return code.
//!
//! The background-task-plus-shutdown-channel shape is the teacher's
//! `supervisor::health_monitor::spawn_health_monitor`.

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::types::TerminationReport;
use crate::mailbox::MailboxSender;
use crate::message::{Message, MessageEnvelope};

/// Whether a detector should notify on crash, on clean termination, or both.
/// Mirrors the `notify_on_crash` / `notify_on_termination` constructor flags
/// of `ServiceTerminationDetector`.
#[derive(Debug, Clone, Copy)]
pub struct NotifyOn {
    /// Emit a report when the victim's task ends abnormally.
    pub crash: bool,
    /// Emit a report when the victim's task ends cleanly.
    pub termination: bool,
}

impl Default for NotifyOn {
    /// The common case: notify on both outcomes.
    fn default() -> Self {
        Self {
            crash: true,
            termination: true,
        }
    }
}

/// A report message wrapping a [`TerminationReport`] so it can travel
/// through a [`crate::mailbox`].
#[derive(Debug, Clone)]
pub struct TerminationReportMessage<Id>(pub TerminationReport<Id>);

impl<Id: Clone + Send + Sync + Debug + 'static> Message for TerminationReportMessage<Id> {
    const MESSAGE_KIND: &'static str = "termination_report";
}

/// Spawns a task that awaits `victim` exactly once and reports the outcome
/// to `report_to`, honouring `notify_on`. The victim's own exit code (e.g.
/// the WU executor's job-terminated flag encoded as an `i32`) is whatever
/// the joined task resolves to on success.
///
/// Returns the detector's own `JoinHandle`; dropping it does not cancel the
/// detector (it runs independently), matching the fire-and-forget helper
/// service semantics in original_source.
pub fn watch<Id, S>(
    id: Id,
    victim: JoinHandle<i32>,
    report_to: S,
    notify_on: NotifyOn,
) -> JoinHandle<Result<(), S::Error>>
where
    Id: Clone + Send + Sync + Debug + 'static,
    S: MailboxSender<TerminationReportMessage<Id>> + 'static,
{
    tokio::spawn(async move {
        let report = match victim.await {
            Ok(return_code) => {
                if !notify_on.termination {
                    return Ok(());
                }
                TerminationReport::Terminated(id, return_code)
            }
            Err(_join_error) => {
                if !notify_on.crash {
                    return Ok(());
                }
                TerminationReport::Crashed(id)
            }
        };
        report_to
            .send(MessageEnvelope::new(TerminationReportMessage(report)))
            .await
    })
}
