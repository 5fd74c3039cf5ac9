//! Bare-metal compute service, work-unit factory and executor (spec.md
//! §4.3-§4.5): the scheduling core of the simulation.

mod executor;
mod service;
mod workunit;

pub use executor::{execute_workunit, StorageServiceResolver, WuOutcome};
pub use service::{BareMetalComputeService, ResourceInformation};
pub use workunit::{build_workunit_graph, WorkUnit, WorkUnitGraph, WorkUnitKind};
