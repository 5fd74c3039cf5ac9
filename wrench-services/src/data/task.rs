//! Tasks: the unit of compute work inside a [`super::job::StandardJob`].

use super::file::File;

/// A task's internal state (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Not yet schedulable (has incomplete parents in its owning WU graph).
    NotReady,
    /// Schedulable; waiting for placement.
    Ready,
    /// Currently executing inside a work-unit executor.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished unsuccessfully; may be reset to `Ready` on job resubmission.
    Failed,
}

/// A single compute task: flop count, core/ram bounds, and its input/output
/// file sets.
#[derive(Debug, Clone)]
pub struct Task {
    id: String,
    flops: f64,
    min_cores: u32,
    max_cores: u32,
    ram_bytes: u64,
    input_files: Vec<File>,
    output_files: Vec<File>,
    state: TaskState,
}

impl Task {
    /// Build a new task, starting `NotReady`.
    pub fn new(
        id: impl Into<String>,
        flops: f64,
        min_cores: u32,
        max_cores: u32,
        ram_bytes: u64,
        input_files: Vec<File>,
        output_files: Vec<File>,
    ) -> Self {
        Self {
            id: id.into(),
            flops,
            min_cores: min_cores.max(1),
            max_cores: max_cores.max(min_cores.max(1)),
            ram_bytes,
            input_files,
            output_files,
            state: TaskState::NotReady,
        }
    }

    /// The task's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total flop count.
    pub fn flops(&self) -> f64 {
        self.flops
    }

    /// Minimum usable cores.
    pub fn min_cores(&self) -> u32 {
        self.min_cores
    }

    /// Maximum usable cores.
    pub fn max_cores(&self) -> u32 {
        self.max_cores
    }

    /// Ram requirement in bytes.
    pub fn ram_bytes(&self) -> u64 {
        self.ram_bytes
    }

    /// This task's input files.
    pub fn input_files(&self) -> &[File] {
        &self.input_files
    }

    /// This task's output files.
    pub fn output_files(&self) -> &[File] {
        &self.output_files
    }

    /// Current state.
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Transition to a new state.
    pub fn set_state(&mut self, state: TaskState) {
        self.state = state;
    }
}
