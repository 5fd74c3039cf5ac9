//! The remaining error taxonomy from spec.md §7 not already covered by
//! [`wrench_kernel::KernelError`] (`HostError`, `NetworkError`, `Timeout`).

use thiserror::Error;
use wrench_kernel::KernelError;

use crate::data::{File, FileLocation};

/// Errors raised by any service (storage or compute) at the protocol level.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The target service is DOWN at request time.
    #[error("service '{service}' is down")]
    ServiceIsDown {
        /// Name of the down service.
        service: String,
    },

    /// Legal syntax but forbidden by current state.
    #[error("not allowed: {reason}")]
    NotAllowed {
        /// Human-readable reason.
        reason: String,
    },

    /// Caller misuse, caught at validation time.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable reason.
        reason: String,
    },

    /// A kernel-level failure (host or network) propagated verbatim.
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Errors raised by the bare-metal compute service.
#[derive(Debug, Error)]
pub enum ComputeServiceError {
    /// Service does not accept this job category (e.g. pilot jobs).
    #[error("job type not supported: {reason}")]
    JobTypeNotSupported {
        /// Human-readable reason.
        reason: String,
    },

    /// No host can satisfy the task's minimum cores + ram.
    #[error("not enough resources to run task '{task}'")]
    NotEnoughResources {
        /// The task that could not be placed.
        task: String,
    },

    /// The job was cancelled by its compute service or by the controller.
    #[error("job '{job}' was killed")]
    JobKilled {
        /// The killed job's name.
        job: String,
    },

    /// A general protocol-level error (down service, bad args, not allowed).
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A kernel-level failure propagated verbatim.
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Errors raised by any member of the storage service family.
#[derive(Debug, Error)]
pub enum StorageServiceError {
    /// Storage does not hold the requested file.
    #[error("file not found at {location:?}")]
    FileNotFound {
        /// The location that was queried.
        location: FileLocation,
    },

    /// A write would exceed the mount point's capacity.
    #[error("not enough storage space on '{service}'")]
    NotEnoughStorageSpace {
        /// Name of the storage service that rejected the write.
        service: String,
    },

    /// The controller provided neither a per-file location nor a default.
    #[error("no storage service configured for file '{}'", file.id())]
    NoStorageServiceForFile {
        /// The file with no resolvable location.
        file: File,
    },

    /// A general protocol-level error (down service, bad args, not allowed).
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A kernel-level failure propagated verbatim.
    #[error(transparent)]
    Kernel(#[from] KernelError),
}
