use super::metrics::{total_distance, MetricsConfig};
use super::plan::RoutePlan;
use crate::common::{DomainError, DomainResult};
use crate::domains::containers::{ensure_unique_ids, Container};
use crate::domains::geo::{distance_km, Coordinate, GeoPoint};
use crate::domains::priority::{HopContext, PriorityWeights};
use ordered_float::OrderedFloat;

/// Priority-weighted greedy nearest-neighbour sequencing.
///
/// O(n²), deterministic, and stable when fill levels change between runs.
/// Not an exact TSP solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteOptimizer {
    pub weights: PriorityWeights,
    pub metrics: MetricsConfig,
}

impl RouteOptimizer {
    pub fn new(weights: PriorityWeights, metrics: MetricsConfig) -> Self {
        Self { weights, metrics }
    }

    /// Orders `containers` starting from `start`.
    ///
    /// Ties on weighted distance go to the container that comes first in the
    /// input.
    pub fn optimize(&self, containers: &[Container], start: GeoPoint) -> DomainResult<RoutePlan> {
        let stops = self.sequence(containers, &start)?;
        let distance = total_distance(&start, &stops)?;
        let minutes = self.metrics.estimated_minutes(distance, stops.len());
        Ok(RoutePlan::new(start, stops, distance, minutes))
    }

    /// Variant for callers without a live fix: starts at the first container's own position.
    pub fn optimize_from_first(&self, containers: &[Container]) -> DomainResult<RoutePlan> {
        let first = containers.first().ok_or(DomainError::EmptyContainerSet)?;
        self.optimize(containers, first.to_point())
    }

    fn sequence(&self, containers: &[Container], start: &GeoPoint) -> DomainResult<Vec<Container>> {
        if containers.is_empty() {
            return Err(DomainError::EmptyContainerSet);
        }
        ensure_unique_ids(containers)?;

        let mut remaining: Vec<&Container> = containers.iter().collect();
        let mut ordered = Vec::with_capacity(containers.len());

        let first = self.nearest(start, &remaining, HopContext::FirstHop)?;
        ordered.push(remaining.remove(first).clone());

        while !remaining.is_empty() {
            let current = ordered.last().ok_or(DomainError::EmptyContainerSet)?;
            let next = self.nearest(current, &remaining, HopContext::SubsequentHop)?;
            ordered.push(remaining.remove(next).clone());
        }

        Ok(ordered)
    }

    /// Index into `candidates` of the smallest weighted distance from `from`.
    fn nearest<F: Coordinate>(
        &self,
        from: &F,
        candidates: &[&Container],
        context: HopContext,
    ) -> DomainResult<usize> {
        let mut scored = Vec::with_capacity(candidates.len());
        for (index, candidate) in candidates.iter().enumerate() {
            let weighted = distance_km(from, *candidate)? * self.weights.weight(candidate.fill_level(), context);
            scored.push((index, OrderedFloat(weighted)));
        }
        // min_by_key keeps the first of equal minima
        scored
            .into_iter()
            .min_by_key(|(_, weighted)| *weighted)
            .map(|(index, _)| index)
            .ok_or(DomainError::EmptyContainerSet)
    }
}

/// [`RouteOptimizer::optimize`] with the default weights and travel model.
pub fn optimize(containers: &[Container], start: GeoPoint) -> DomainResult<RoutePlan> {
    RouteOptimizer::default().optimize(containers, start)
}
