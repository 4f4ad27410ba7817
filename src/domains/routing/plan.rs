use crate::domains::containers::{Container, ContainerId};
use crate::domains::geo::GeoPoint;
use crate::domains::priority::{urgency_of, UrgencyClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable visiting order with its aggregate metrics.
/// A new plan is computed for every change of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    id: String,
    start: GeoPoint,
    stops: Vec<Container>,
    total_distance_km: f64,
    estimated_minutes: u32,
    created_at: DateTime<Utc>,
}

impl RoutePlan {
    pub(crate) fn new(
        start: GeoPoint,
        stops: Vec<Container>,
        total_distance_km: f64,
        estimated_minutes: u32,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            stops,
            total_distance_km,
            estimated_minutes,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn stops(&self) -> &[Container] {
        &self.stops
    }

    pub fn stop(&self, index: usize) -> Option<&Container> {
        self.stops.get(index)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stop_ids(&self) -> Vec<ContainerId> {
        self.stops.iter().map(|c| c.id().clone()).collect()
    }

    pub fn critical_count(&self) -> usize {
        self.stops
            .iter()
            .filter(|c| urgency_of(c) == UrgencyClass::Critical)
            .count()
    }
}
