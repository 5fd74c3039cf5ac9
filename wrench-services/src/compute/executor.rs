//! Work-unit executor (spec.md §4.5): carries out one [`WorkUnit`]'s
//! file-copy/read/compute/write/cleanup sequence, stopping on first
//! failure.

use std::sync::Arc;

use wrench_kernel::host::HostId;
use wrench_kernel::Simulation;

use super::workunit::{WorkUnit, WorkUnitKind};
use crate::data::{FileLocation, StandardJob};
use crate::error::ComputeServiceError;
use crate::storage::StorageService;

/// Looks up a storage service by name, the way a platform registry would.
/// Expressed as a closure rather than a literal registry type so the
/// compute service can be handed any source of truth (a static map in
/// tests, a live service directory in a full deployment).
pub type StorageServiceResolver = Arc<dyn Fn(&str) -> Option<Arc<dyn StorageService>> + Send + Sync>;

/// Outcome of running one work unit to completion.
#[derive(Debug)]
pub enum WuOutcome {
    /// Ran to completion; `files_in_scratch` lists every file the
    /// executor ended up staging in scratch along the way.
    Completed {
        /// Files this work unit left behind in scratch.
        files_in_scratch: Vec<FileLocation>,
    },
    /// Stopped early; `cause` is a human-readable description.
    Failed {
        /// Why the work unit failed.
        cause: String,
        /// Files staged in scratch before the failure.
        files_in_scratch: Vec<FileLocation>,
    },
}

fn scratch_location(job_name: &str, file_id: &str, scratch: &Arc<dyn StorageService>) -> FileLocation {
    FileLocation::new(
        scratch.name(),
        format!("/scratch/{job_name}"),
        crate::data::File::new(file_id, 0),
    )
}

async fn copy_step(step: &crate::data::FileCopyStep, resolver: &StorageServiceResolver) -> Result<(), ComputeServiceError> {
    let src_service = resolver(&step.src.storage_service).ok_or_else(|| {
        ComputeServiceError::Service(crate::error::ServiceError::InvalidArgument {
            reason: format!("unknown storage service '{}'", step.src.storage_service),
        })
    })?;
    let dst_service = resolver(&step.dst.storage_service).ok_or_else(|| {
        ComputeServiceError::Service(crate::error::ServiceError::InvalidArgument {
            reason: format!("unknown storage service '{}'", step.dst.storage_service),
        })
    })?;
    src_service.read(&step.src).await?;
    dst_service.write(&step.dst).await?;
    Ok(())
}

/// Read one task input, falling back to scratch and recording the fallback
/// if the file's declared location doesn't have it.
async fn read_input(
    file: &crate::data::File,
    job: &StandardJob,
    resolver: &StorageServiceResolver,
    scratch: Option<&Arc<dyn StorageService>>,
    files_in_scratch: &mut Vec<FileLocation>,
) -> Result<(), ComputeServiceError> {
    if let Some(location) = job.file_location(file.id()) {
        if let Some(service) = resolver(&location.storage_service) {
            if service.read(location).await.is_ok() {
                return Ok(());
            }
        }
    }
    let scratch = scratch.ok_or_else(|| {
        ComputeServiceError::Service(crate::error::ServiceError::InvalidArgument {
            reason: format!("input file '{}' not found and no scratch configured", file.id()),
        })
    })?;
    let loc = scratch_location(job.name(), file.id(), scratch);
    scratch.read(&loc).await?;
    files_in_scratch.push(loc);
    Ok(())
}

/// Write one task output to its resolved location, falling back to
/// scratch (and recording it) if the job has no location for it.
async fn write_output(
    file: &crate::data::File,
    job: &StandardJob,
    resolver: &StorageServiceResolver,
    scratch: Option<&Arc<dyn StorageService>>,
    files_in_scratch: &mut Vec<FileLocation>,
) -> Result<(), ComputeServiceError> {
    if let Some(location) = job.file_location(file.id()) {
        if let Some(service) = resolver(&location.storage_service) {
            service.write(location).await?;
            return Ok(());
        }
    }
    let scratch = scratch.ok_or_else(|| {
        ComputeServiceError::Service(crate::error::ServiceError::InvalidArgument {
            reason: format!("output file '{}' has no location and no scratch configured", file.id()),
        })
    })?;
    let loc = scratch_location(job.name(), file.id(), scratch);
    scratch.write(&loc).await?;
    files_in_scratch.push(loc);
    Ok(())
}

/// Run `wu` to completion or first failure (spec.md §4.5 steps 1-5).
///
/// `host`/`cores` describe the allocation the dispatch loop already
/// committed to this work unit; releasing those resources on return is
/// the caller's job, not this function's.
#[allow(clippy::too_many_arguments)]
pub async fn execute_workunit(
    wu: &WorkUnit,
    job: &StandardJob,
    host: &HostId,
    cores: u32,
    flop_rate: f64,
    sim: &Simulation,
    resolver: &StorageServiceResolver,
    scratch: Option<&Arc<dyn StorageService>>,
    thread_startup_overhead: f64,
    simulate_computation_as_sleep: bool,
) -> WuOutcome {
    let mut files_in_scratch = Vec::new();

    let steps: &[crate::data::FileCopyStep] = match wu.kind() {
        WorkUnitKind::Pre => job.pre_file_copies(),
        WorkUnitKind::Post => job.post_file_copies(),
        WorkUnitKind::Task { .. } => &[],
    };
    for step in steps {
        if let Err(e) = copy_step(step, resolver).await {
            return WuOutcome::Failed {
                cause: e.to_string(),
                files_in_scratch,
            };
        }
    }

    if let WorkUnitKind::Post = wu.kind() {
        for location in job.file_deletions() {
            if let Some(service) = resolver(&location.storage_service) {
                if let Err(e) = service.delete(location).await {
                    return WuOutcome::Failed {
                        cause: e.to_string(),
                        files_in_scratch,
                    };
                }
            }
        }
    }

    if let Some(task_index) = wu.task_index() {
        let task = &job.tasks()[task_index];

        if sim.sleep(host, thread_startup_overhead * cores as f64).await.is_err() {
            return WuOutcome::Failed {
                cause: format!("host '{host}' died during startup overhead"),
                files_in_scratch,
            };
        }

        for file in task.input_files() {
            if let Err(e) = read_input(file, job, resolver, scratch, &mut files_in_scratch).await {
                return WuOutcome::Failed {
                    cause: e.to_string(),
                    files_in_scratch,
                };
            }
        }

        let compute_result = if simulate_computation_as_sleep {
            let dt = if cores > 0 && flop_rate > 0.0 { task.flops() / (cores as f64 * flop_rate) } else { 0.0 };
            sim.sleep(host, dt).await
        } else {
            sim.compute(host, task.flops() / cores.max(1) as f64).await
        };
        if compute_result.is_err() {
            return WuOutcome::Failed {
                cause: format!("host '{host}' died mid-computation"),
                files_in_scratch,
            };
        }

        for file in task.output_files() {
            if let Err(e) = write_output(file, job, resolver, scratch, &mut files_in_scratch).await {
                return WuOutcome::Failed {
                    cause: e.to_string(),
                    files_in_scratch,
                };
            }
        }
    }

    WuOutcome::Completed { files_in_scratch }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::workunit::{build_workunit_graph, WorkUnitKind};
    use crate::data::{File, StandardJob, Task};
    use crate::storage::{BufferMode, DiskSpec, SimpleStorageService};
    use wrench_kernel::host::HostSpec;
    use wrench_kernel::KernelConfig;
    use wrench_rt::util::ActorAddress;

    fn resolver_over(services: Vec<Arc<dyn StorageService>>) -> StorageServiceResolver {
        Arc::new(move |name: &str| services.iter().find(|s| s.name() == name).cloned())
    }

    #[tokio::test]
    async fn task_with_no_io_completes_with_empty_scratch_usage() {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("H1");
        sim.hosts().add_host(host.clone(), HostSpec::new(4, 1e6, 1 << 30));

        let task = Task::new("t1", 1_000.0, 1, 1, 0, vec![], vec![]);
        let job = StandardJob::new("job1", vec![task], ActorAddress::named("ctl"));
        let graph = build_workunit_graph(&job);
        let wu = graph.units().iter().find(|wu| matches!(wu.kind(), WorkUnitKind::Task { .. })).unwrap();

        let resolver = resolver_over(vec![]);
        let outcome = execute_workunit(wu, &job, &host, 1, 1e6, &sim, &resolver, None, 0.0, true).await;
        assert!(matches!(outcome, WuOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn missing_input_with_no_scratch_fails_the_workunit() {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("H1");
        sim.hosts().add_host(host.clone(), HostSpec::new(4, 1e6, 1 << 30));

        let task = Task::new("t1", 1.0, 1, 1, 0, vec![File::new("missing", 10)], vec![]);
        let job = StandardJob::new("job1", vec![task], ActorAddress::named("ctl"));
        let graph = build_workunit_graph(&job);
        let wu = graph.units().iter().find(|wu| matches!(wu.kind(), WorkUnitKind::Task { .. })).unwrap();

        let resolver = resolver_over(vec![]);
        let outcome = execute_workunit(wu, &job, &host, 1, 1e6, &sim, &resolver, None, 0.0, true).await;
        assert!(matches!(outcome, WuOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn scratch_fallback_serves_an_unlocated_input() {
        let sim = Simulation::new(KernelConfig::default());
        let host = HostId::new("H1");
        sim.hosts().add_host(host.clone(), HostSpec::new(4, 1e6, 1 << 30));

        let scratch = Arc::new(SimpleStorageService::new("scratch", host.clone(), sim.clone(), BufferMode::Fluid));
        scratch.add_mount(
            "/scratch/job1",
            DiskSpec {
                capacity_bytes: 10_000,
                read_bandwidth: 1_000_000.0,
                write_bandwidth: 1_000_000.0,
            },
        );
        let loc = FileLocation::new("scratch", "/scratch/job1", File::new("in1", 10));
        scratch.write(&loc).await.unwrap();

        let task = Task::new("t1", 1.0, 1, 1, 0, vec![File::new("in1", 10)], vec![]);
        let job = StandardJob::new("job1", vec![task], ActorAddress::named("ctl"));
        let graph = build_workunit_graph(&job);
        let wu = graph.units().iter().find(|wu| matches!(wu.kind(), WorkUnitKind::Task { .. })).unwrap();

        let scratch_dyn: Arc<dyn StorageService> = scratch;
        let resolver = resolver_over(vec![scratch_dyn.clone()]);
        let outcome = execute_workunit(wu, &job, &host, 1, 1e6, &sim, &resolver, Some(&scratch_dyn), 0.0, true).await;
        match outcome {
            WuOutcome::Completed { files_in_scratch } => assert_eq!(files_in_scratch.len(), 1),
            WuOutcome::Failed { cause, .. } => panic!("expected completion, got failure: {cause}"),
        }
    }
}
