use super::container::Container;
use crate::common::{DomainError, DomainResult};
use crate::domains::priority::{urgency_of, UrgencyClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A point-in-time list of containers with unique ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub containers: Vec<Container>,
    pub captured_at: DateTime<Utc>,
}

impl ContainerSnapshot {
    pub fn new(containers: Vec<Container>) -> DomainResult<Self> {
        ensure_unique_ids(&containers)?;
        Ok(Self {
            containers,
            captured_at: Utc::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn statistics(&self) -> FleetStatistics {
        FleetStatistics::from_containers(&self.containers)
    }
}

pub(crate) fn ensure_unique_ids(containers: &[Container]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(containers.len());
    for c in containers {
        if !seen.insert(c.id()) {
            return Err(DomainError::DuplicateContainer {
                id: c.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Counts per urgency class, as shown on the dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetStatistics {
    pub total: usize,
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
}

impl FleetStatistics {
    pub fn from_containers(containers: &[Container]) -> Self {
        containers.iter().fold(Self::default(), |mut acc, c| {
            acc.total += 1;
            match urgency_of(c) {
                UrgencyClass::Critical => acc.critical += 1,
                UrgencyClass::Medium => acc.medium += 1,
                UrgencyClass::Low => acc.low += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str, fill: i64) -> Container {
        Container::new(id, -33.45, -70.66, fill, Utc::now()).unwrap()
    }

    #[test]
    fn statistics_by_class() {
        let stats = FleetStatistics::from_containers(&[c("a", 10), c("b", 30), c("c", 31), c("d", 71), c("e", 100)]);
        assert_eq!(
            stats,
            FleetStatistics {
                total: 5,
                critical: 2,
                medium: 1,
                low: 2
            }
        );
    }

    #[test]
    fn statistics_agree_with_classification() {
        let fleet: Vec<Container> = (0..=100).map(|fill| c(&format!("c{fill}"), fill)).collect();
        let stats = FleetStatistics::from_containers(&fleet);
        let count = |class: UrgencyClass| {
            fleet
                .iter()
                .filter(|c| crate::domains::priority::classify(i64::from(c.fill_level())) == Ok(class))
                .count()
        };
        assert_eq!(stats.total, 101);
        assert_eq!(stats.low, count(UrgencyClass::Low));
        assert_eq!(stats.medium, count(UrgencyClass::Medium));
        assert_eq!(stats.critical, count(UrgencyClass::Critical));
        assert_eq!((stats.low, stats.medium, stats.critical), (31, 40, 30));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = ContainerSnapshot::new(vec![c("a", 10), c("a", 20)]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateContainer { id: "a".into() });
    }
}
