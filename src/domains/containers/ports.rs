use super::snapshot::ContainerSnapshot;
use crate::common::DomainResult;

/// Port the routing side depends on for the current container snapshot.
/// Ingestion and persistence of sensor readings live behind it.
pub trait ContainerSource: Send + Sync {
    fn load_snapshot(&self) -> DomainResult<ContainerSnapshot>;
}
