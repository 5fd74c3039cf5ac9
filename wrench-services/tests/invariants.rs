//! End-to-end scenarios and cross-cutting invariants (spec.md §8).

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use wrench_kernel::host::{HostId, HostSpec};
use wrench_kernel::{KernelConfig, Simulation};
use wrench_rt::util::ActorAddress;
use wrench_services::compute::{BareMetalComputeService, StorageServiceResolver};
use wrench_services::data::{File, FileLocation, StandardJob, Task};
use wrench_services::registry::FileRegistry;
use wrench_services::storage::{BufferMode, DiskSpec, SimpleStorageService, StorageService};

fn mounted(sim: &Simulation, name: &str, host: &HostId) -> Arc<SimpleStorageService> {
    let svc = SimpleStorageService::new(name, host.clone(), sim.clone(), BufferMode::Fluid);
    svc.add_mount(
        "/disk0",
        DiskSpec {
            capacity_bytes: 10_000_000,
            read_bandwidth: 1_000_000.0,
            write_bandwidth: 1_000_000.0,
        },
    );
    svc
}

/// E1: one-host success. Task `t` reads `f` from storage on B, computes,
/// and writes `o` back to B; the job reports done and `o` lands on B.
#[tokio::test]
async fn e1_one_host_success_produces_the_output_file() {
    let sim = Simulation::new(KernelConfig::default());
    let host_a = HostId::new("A");
    let host_b = HostId::new("B");
    sim.hosts().add_host(host_a.clone(), HostSpec::new(4, 1.0, 16_000_000_000));
    sim.hosts().add_host(host_b.clone(), HostSpec::new(1, 1.0, 1));

    let storage_b = mounted(&sim, "StorageB", &host_b);
    let input = File::new("f", 10_000);
    let output = File::new("o", 20_000);
    let input_loc = FileLocation::new("StorageB", "/disk0", input.clone());
    let output_loc = FileLocation::new("StorageB", "/disk0", output.clone());
    storage_b.write(&input_loc).await.unwrap();

    let services: Vec<Arc<dyn StorageService>> = vec![storage_b.clone()];
    let resolver: StorageServiceResolver = Arc::new(move |name: &str| services.iter().find(|s| s.name() == name).cloned());
    let service = BareMetalComputeService::new(
        "cs_a",
        sim.clone(),
        vec![host_a],
        resolver,
        None,
        0.0,
        true,
        false,
        None,
    );

    let task = Task::new("t", 3600.0, 1, 1, 0, vec![input.clone()], vec![output.clone()]);
    let mut job = StandardJob::new("job1", vec![task], ActorAddress::named("ctl"));
    job.set_file_location(input.id(), input_loc);
    job.set_file_location(output.id(), output_loc.clone());

    service.submit_standard_job(job, Default::default()).await.unwrap();
    for _ in 0..10 {
        tokio::task::yield_now().await;
        service.pump_events().await;
    }

    assert!(storage_b.lookup(&output_loc).await);

    let info = service.get_resource_information().await;
    // Invariant 1: idle cores never exceed granted cores, and the job has
    // long since finished, so every host must be back to fully idle.
    for (cores, idle_cores, _, ram_capacity, ram_available) in info.per_host.values() {
        assert!(*idle_cores <= *cores);
        assert_eq!(*idle_cores, *cores);
        assert_eq!(*ram_available, *ram_capacity);
    }
}

/// E6: compound striping with one child failing mid-write must roll back
/// the mapping so a subsequent lookup reports "not present" (§8 item 2,
/// scenario E6).
#[tokio::test]
async fn e6_compound_write_failure_leaves_no_mapping_behind() {
    use wrench_services::storage::CompoundStorageService;

    let sim = Simulation::new(KernelConfig::default());
    let host = HostId::new("H");
    sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));

    let s1: Arc<dyn StorageService> = mounted(&sim, "S1", &host);
    // S2 has zero capacity: any non-empty stripe write to it fails,
    // simulating "S2 is unavailable mid-write".
    let s2_raw = SimpleStorageService::new("S2", host.clone(), sim.clone(), BufferMode::Fluid);
    s2_raw.add_mount(
        "/disk0",
        DiskSpec {
            capacity_bytes: 0,
            read_bandwidth: 1_000_000.0,
            write_bandwidth: 1_000_000.0,
        },
    );
    let s2: Arc<dyn StorageService> = Arc::new(s2_raw);

    let compound = CompoundStorageService::new("compound", sim.clone(), vec![s1, s2], None, 0);
    let loc = FileLocation::new("compound", "/virtual", File::new("big", 4_000));

    assert!(compound.write(&loc).await.is_err());
    assert!(!compound.lookup(&loc).await);
}

/// §8 item 6: file registry is eventually consistent — an add followed by
/// a lookup with no intervening remove returns the added location.
#[test]
fn registry_add_then_lookup_finds_the_location() {
    let registry = FileRegistry::new();

    let loc = FileLocation::new("S1", "/disk0", File::new("f1", 10));
    registry.add_entry(loc.clone());
    assert!(registry.known_locations("f1").contains(&loc));

    registry.remove_entry("f1", &loc);
    assert!(!registry.known_locations("f1").contains(&loc));
}

/// §8 item 7: write-then-read round trips; write-then-delete-then-lookup
/// reports absent.
#[tokio::test]
async fn storage_round_trip_and_delete_then_lookup_is_absent() {
    let sim = Simulation::new(KernelConfig::default());
    let host = HostId::new("H");
    sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));
    let svc = mounted(&sim, "S1", &host);

    let loc = FileLocation::new("S1", "/disk0", File::new("f1", 5_000));
    svc.write(&loc).await.unwrap();
    assert!(svc.lookup(&loc).await);
    svc.read(&loc).await.unwrap();

    svc.delete(&loc).await.unwrap();
    assert!(!svc.lookup(&loc).await);
}

/// §8 item 8: terminating an unknown job is a no-op returning NotAllowed,
/// and is safe to call repeatedly.
#[tokio::test]
async fn terminate_unknown_job_is_idempotently_not_allowed() {
    let sim = Simulation::new(KernelConfig::default());
    let host = HostId::new("H");
    sim.hosts().add_host(host.clone(), HostSpec::new(1, 1.0, 1));
    let resolver: StorageServiceResolver = Arc::new(|_| None);
    let service = BareMetalComputeService::new("cs", sim, vec![host], resolver, None, 0.0, true, false, None);

    assert!(service.terminate_standard_job("ghost").await.is_err());
    assert!(service.terminate_standard_job("ghost").await.is_err());
}
