//! Core data model: files, locations, tasks, jobs, and compute resources
//! (spec.md §3).

mod file;
mod job;
mod resource;
mod task;

pub use file::{File, FileLocation, ProxyLocation};
pub use job::{FileCopyStep, StandardJob};
pub use resource::{ComputeResource, ComputeResourceLedger};
pub use task::{Task, TaskState};
