//! Controller-facing event types (spec.md §6.2): everything a controller
//! may observe on a mailbox it owns.

use wrench_rt::message::Message;
use wrench_rt::util::ActorAddress;

use crate::data::FileLocation;

/// One event delivered to a controller's callback mailbox.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// A standard job finished successfully.
    StandardJobDone {
        /// The job's name.
        job: String,
        /// The compute service that ran it.
        compute_service: ActorAddress,
    },
    /// A standard job failed.
    StandardJobFailed {
        /// The job's name.
        job: String,
        /// The compute service that ran it.
        compute_service: ActorAddress,
        /// Human-readable cause.
        cause: String,
    },
    /// A file copy completed.
    FileCopyCompleted {
        /// Source location.
        src: FileLocation,
        /// Destination location.
        dst: FileLocation,
    },
    /// A file copy failed.
    FileCopyFailed {
        /// Source location.
        src: FileLocation,
        /// Destination location.
        dst: FileLocation,
        /// Human-readable cause.
        cause: String,
    },
    /// A pilot job's lease expired. Pilot jobs are out of scope for
    /// submission (§4.3 rejects them with `JobTypeNotSupported`); this
    /// variant exists so the controller-facing event enum stays complete
    /// per §6.2, even though nothing in this build ever emits it.
    PilotJobExpired {
        /// The pilot job's name.
        pilot_job: String,
        /// The compute service it was running under.
        compute_service: ActorAddress,
    },
    /// A watched service crashed (termination detector report).
    ServiceHasCrashed {
        /// The crashed service's address.
        service: ActorAddress,
    },
    /// A watched service terminated cleanly.
    ServiceHasTerminated {
        /// The terminated service's address.
        service: ActorAddress,
        /// Its return code.
        return_code: i32,
    },
    /// An alarm fired, delivering its payload description.
    AlarmFired {
        /// The alarm's payload, rendered for delivery.
        payload: String,
    },
}

impl Message for ControllerEvent {
    const MESSAGE_KIND: &'static str = "controller_event";
}
