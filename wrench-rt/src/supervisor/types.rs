//! Types shared by the termination detector.

use serde::{Deserialize, Serialize};

/// The outcome a [`super::TerminationDetector`] reports about its victim,
/// exactly mirroring spec.md §4.2: "it joins the victim's actor. On join
/// completion it emits exactly one of `ServiceHasCrashed(victim)` or
/// `ServiceHasTerminated(victim, return_code)`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReport<Id> {
    /// The victim ended abnormally (task panic, or its host went OFF
    /// while it was running).
    Crashed(Id),
    /// The victim ended through its own graceful shutdown path, with the
    /// given return/exit code.
    Terminated(Id, i32),
}

impl<Id> TerminationReport<Id> {
    /// The id of the actor this report is about.
    pub fn victim(&self) -> &Id {
        match self {
            Self::Crashed(id) => id,
            Self::Terminated(id, _) => id,
        }
    }

    /// Whether this report represents a crash.
    pub fn is_crash(&self) -> bool {
        matches!(self, Self::Crashed(_))
    }
}
