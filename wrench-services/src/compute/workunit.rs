//! Work-unit factory (spec.md §4.4): turns a [`StandardJob`] into a DAG of
//! work units ready for dispatch.

use crate::data::{StandardJob, Task};

/// What a [`WorkUnit`] actually executes.
#[derive(Debug, Clone)]
pub enum WorkUnitKind {
    /// The job's pre-file-copy list; no parents.
    Pre,
    /// One of the job's tasks.
    Task {
        /// Index into the owning job's task list.
        task_index: usize,
    },
    /// The job's post-file-copy and cleanup-deletion lists.
    Post,
}

/// One schedulable unit of work inside a job's DAG.
#[derive(Debug, Clone)]
pub struct WorkUnit {
    id: String,
    kind: WorkUnitKind,
    parents: Vec<String>,
    /// How many of `parents` have not yet completed; decremented as
    /// parents finish, and the WU becomes ready at zero.
    num_pending_parents: usize,
}

impl WorkUnit {
    /// This work unit's id, unique within its job.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// What this work unit executes.
    pub fn kind(&self) -> &WorkUnitKind {
        &self.kind
    }

    /// The ids of this work unit's parents.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Remaining incomplete parents.
    pub fn num_pending_parents(&self) -> usize {
        self.num_pending_parents
    }

    /// Whether this work unit has no outstanding parents and can be
    /// dispatched.
    pub fn is_ready(&self) -> bool {
        self.num_pending_parents == 0
    }

    /// Called when one of this work unit's parents completes.
    pub fn parent_completed(&mut self) {
        self.num_pending_parents = self.num_pending_parents.saturating_sub(1);
    }

    /// This work unit's task, if it wraps one.
    pub fn task_index(&self) -> Option<usize> {
        match self.kind {
            WorkUnitKind::Task { task_index } => Some(task_index),
            _ => None,
        }
    }
}

/// The full DAG produced for one job: every work unit, keyed by id, plus
/// the ids initially ready (no parents).
#[derive(Debug, Clone)]
pub struct WorkUnitGraph {
    units: Vec<WorkUnit>,
}

impl WorkUnitGraph {
    /// All work units, in construction order.
    pub fn units(&self) -> &[WorkUnit] {
        &self.units
    }

    /// Work units with no parents, ready for immediate dispatch.
    pub fn initially_ready(&self) -> Vec<&WorkUnit> {
        self.units.iter().filter(|wu| wu.is_ready()).collect()
    }

    /// Total work unit count.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the graph has no work units at all (an empty job).
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Look up a work unit by id.
    pub fn get(&self, id: &str) -> Option<&WorkUnit> {
        self.units.iter().find(|wu| wu.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut WorkUnit> {
        self.units.iter_mut().find(|wu| wu.id == id)
    }

    /// Every work unit that names `parent_id` as a parent.
    pub fn children_of(&self, parent_id: &str) -> Vec<String> {
        self.units
            .iter()
            .filter(|wu| wu.parents.iter().any(|p| p == parent_id))
            .map(|wu| wu.id.clone())
            .collect()
    }
}

/// Build the work-unit DAG for `job` per the three construction rules
/// (spec.md §4.4):
///
/// 1. Pre-file-copies, if any, become one parent-less "pre" WU.
/// 2. Each task becomes one "task" WU, parented to "pre" if it exists.
/// 3. Post-file-copies/deletions, if any, become one "post" WU parented to
///    every task WU.
///
/// Exactly one WU wraps each task; the result is a series-parallel DAG
/// (at most three "layers": pre, tasks, post) and therefore always
/// acyclic.
pub fn build_workunit_graph(job: &StandardJob) -> WorkUnitGraph {
    let mut units = Vec::new();
    let job_name = job.name();

    let pre_id = if !job.pre_file_copies().is_empty() {
        let id = format!("{job_name}::pre");
        units.push(WorkUnit {
            id: id.clone(),
            kind: WorkUnitKind::Pre,
            parents: Vec::new(),
            num_pending_parents: 0,
        });
        Some(id)
    } else {
        None
    };

    let mut task_wu_ids = Vec::with_capacity(job.tasks().len());
    for (task_index, _task) in job.tasks().iter().enumerate() {
        let id = format!("{job_name}::task::{task_index}");
        let parents: Vec<String> = pre_id.clone().into_iter().collect();
        let num_pending_parents = parents.len();
        units.push(WorkUnit {
            id: id.clone(),
            kind: WorkUnitKind::Task { task_index },
            parents,
            num_pending_parents,
        });
        task_wu_ids.push(id);
    }

    if !job.post_file_copies().is_empty() || !job.file_deletions().is_empty() {
        let id = format!("{job_name}::post");
        let num_pending_parents = task_wu_ids.len();
        units.push(WorkUnit {
            id,
            kind: WorkUnitKind::Post,
            parents: task_wu_ids,
            num_pending_parents,
        });
    }

    WorkUnitGraph { units }
}

fn task_named(id: &str) -> Task {
    Task::new(id, 1.0, 1, 1, 0, Vec::new(), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{File, FileCopyStep, FileLocation};
    use wrench_rt::util::ActorAddress;

    fn copy_step(n: usize) -> FileCopyStep {
        let file = File::new(format!("f{n}"), 10);
        FileCopyStep {
            src: FileLocation::new("S1", "/disk0", file.clone()),
            dst: FileLocation::new("S2", "/disk0", file.clone()),
            file,
        }
    }

    #[test]
    fn job_with_no_copies_has_one_wu_per_task() {
        let job = StandardJob::new("j1", vec![task_named("t1"), task_named("t2")], ActorAddress::named("ctl"));
        let graph = build_workunit_graph(&job);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.initially_ready().len(), 2);
    }

    #[test]
    fn pre_copies_produce_one_parentless_wu_that_gates_every_task() {
        let job = StandardJob::new("j1", vec![task_named("t1"), task_named("t2")], ActorAddress::named("ctl"))
            .with_pre_file_copies(vec![copy_step(1)]);
        let graph = build_workunit_graph(&job);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.initially_ready().len(), 1);
        let pre = graph.get("j1::pre").unwrap();
        assert!(matches!(pre.kind(), WorkUnitKind::Pre));
        assert_eq!(graph.children_of("j1::pre").len(), 2);
    }

    #[test]
    fn post_copies_produce_one_wu_parented_to_every_task() {
        let job = StandardJob::new("j1", vec![task_named("t1"), task_named("t2")], ActorAddress::named("ctl"))
            .with_post_file_copies(vec![copy_step(1)]);
        let graph = build_workunit_graph(&job);
        assert_eq!(graph.len(), 3);
        let post = graph.get("j1::post").unwrap();
        assert_eq!(post.parents().len(), 2);
        assert!(!post.is_ready());
    }

    #[test]
    fn exactly_one_wu_wraps_each_task() {
        let job = StandardJob::new("j1", vec![task_named("t1"), task_named("t2"), task_named("t3")], ActorAddress::named("ctl"))
            .with_pre_file_copies(vec![copy_step(1)])
            .with_post_file_copies(vec![copy_step(2)]);
        let graph = build_workunit_graph(&job);
        let task_wus: Vec<_> = graph.units().iter().filter(|wu| wu.task_index().is_some()).collect();
        assert_eq!(task_wus.len(), 3);
        let mut seen = std::collections::HashSet::new();
        for wu in task_wus {
            assert!(seen.insert(wu.task_index().unwrap()));
        }
    }

    #[test]
    fn completing_all_parents_makes_post_ready() {
        let job = StandardJob::new("j1", vec![task_named("t1")], ActorAddress::named("ctl")).with_file_deletions(vec![]);
        let job = job.with_post_file_copies(vec![copy_step(1)]);
        let mut graph = build_workunit_graph(&job);
        assert!(!graph.get("j1::post").unwrap().is_ready());
        graph.get_mut("j1::post").unwrap().parent_completed();
        assert!(graph.get("j1::post").unwrap().is_ready());
    }

    proptest::proptest! {
        #[test]
        fn graph_is_always_acyclic_and_has_no_duplicate_task_wus(
            has_pre in proptest::bool::ANY,
            num_tasks in 0usize..8,
            has_post in proptest::bool::ANY,
        ) {
            let tasks: Vec<Task> = (0..num_tasks).map(|i| task_named(format!("t{i}"))).collect();
            let mut job = StandardJob::new("job", tasks, ActorAddress::named("ctl"));
            if has_pre {
                job = job.with_pre_file_copies(vec![copy_step(100)]);
            }
            if has_post {
                job = job.with_post_file_copies(vec![copy_step(200)]);
            }
            let graph = build_workunit_graph(&job);

            // Series-parallel by construction: at most 3 layers (pre, task, post).
            // A topological sort must exist — verify via Kahn's algorithm.
            let mut pending: std::collections::HashMap<String, usize> =
                graph.units().iter().map(|wu| (wu.id().to_string(), wu.num_pending_parents())).collect();
            let mut frontier: Vec<String> = graph.initially_ready().iter().map(|wu| wu.id().to_string()).collect();
            let mut visited = 0;
            while let Some(id) = frontier.pop() {
                visited += 1;
                for child in graph.children_of(&id) {
                    let left = pending.get_mut(&child).unwrap();
                    *left -= 1;
                    if *left == 0 {
                        frontier.push(child);
                    }
                }
            }
            proptest::prop_assert_eq!(visited, graph.len());

            let task_indices: Vec<usize> = graph.units().iter().filter_map(|wu| wu.task_index()).collect();
            let unique: std::collections::HashSet<_> = task_indices.iter().collect();
            proptest::prop_assert_eq!(task_indices.len(), unique.len());
            proptest::prop_assert_eq!(task_indices.len(), num_tasks);
        }
    }
}
