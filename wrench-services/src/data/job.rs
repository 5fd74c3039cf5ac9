//! Standard job: an ordered collection of tasks plus pre/post file-copy and
//! cleanup lists (spec.md §3).

use std::collections::HashMap;

use super::file::{File, FileLocation};
use super::task::Task;
use wrench_rt::util::ActorAddress;

/// A single file copy to perform before or after a job's tasks run.
#[derive(Debug, Clone)]
pub struct FileCopyStep {
    /// File to copy.
    pub file: File,
    /// Source location.
    pub src: FileLocation,
    /// Destination location.
    pub dst: FileLocation,
}

/// A job: tasks plus the copy/cleanup lists that frame them, and the
/// location map used to resolve where each input/output file lives.
#[derive(Debug, Clone)]
pub struct StandardJob {
    name: String,
    tasks: Vec<Task>,
    pre_file_copies: Vec<FileCopyStep>,
    post_file_copies: Vec<FileCopyStep>,
    file_deletions: Vec<FileLocation>,
    file_locations: HashMap<String, FileLocation>,
    callback: ActorAddress,
}

impl StandardJob {
    /// Build a new job. `callback` is the controller mailbox address that
    /// receives `StandardJobDone`/`StandardJobFailed`.
    pub fn new(name: impl Into<String>, tasks: Vec<Task>, callback: ActorAddress) -> Self {
        Self {
            name: name.into(),
            tasks,
            pre_file_copies: Vec::new(),
            post_file_copies: Vec::new(),
            file_deletions: Vec::new(),
            file_locations: HashMap::new(),
            callback,
        }
    }

    /// Attach the pre-task file-copy list.
    pub fn with_pre_file_copies(mut self, copies: Vec<FileCopyStep>) -> Self {
        self.pre_file_copies = copies;
        self
    }

    /// Attach the post-task file-copy list.
    pub fn with_post_file_copies(mut self, copies: Vec<FileCopyStep>) -> Self {
        self.post_file_copies = copies;
        self
    }

    /// Attach the cleanup-deletion list.
    pub fn with_file_deletions(mut self, deletions: Vec<FileLocation>) -> Self {
        self.file_deletions = deletions;
        self
    }

    /// Record where a file (by id) resolves, for tasks whose input/output
    /// sets reference it without an explicit location.
    pub fn set_file_location(&mut self, file_id: impl Into<String>, location: FileLocation) {
        self.file_locations.insert(file_id.into(), location);
    }

    /// The job's name (also the scratch-directory name, `/scratch/<name>/`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The job's tasks.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable access to the job's tasks (dispatch updates task state here).
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Pre-task file copies.
    pub fn pre_file_copies(&self) -> &[FileCopyStep] {
        &self.pre_file_copies
    }

    /// Post-task file copies.
    pub fn post_file_copies(&self) -> &[FileCopyStep] {
        &self.post_file_copies
    }

    /// Cleanup deletions.
    pub fn file_deletions(&self) -> &[FileLocation] {
        &self.file_deletions
    }

    /// Resolve a file's location, if recorded.
    pub fn file_location(&self, file_id: &str) -> Option<&FileLocation> {
        self.file_locations.get(file_id)
    }

    /// The controller mailbox this job reports completion/failure to.
    pub fn callback(&self) -> &ActorAddress {
        &self.callback
    }
}
