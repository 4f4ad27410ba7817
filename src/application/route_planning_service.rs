use crate::common::ApplicationResult;
use crate::config::Config;
use crate::domains::containers::{Container, ContainerSnapshot, ContainerSource, FleetStatistics};
use crate::domains::geo::GeoPoint;
use crate::domains::logger::{DomainLogger, DynLogger};
use crate::domains::navigation::{LocationSource, WatchOptions};
use crate::domains::priority::Eligibility;
use crate::domains::routing::{RouteOptimizer, RoutePlan};
use std::sync::Arc;

/// Builds visiting plans from the latest container snapshot.
pub struct RoutePlanningService {
    container_source: Arc<dyn ContainerSource>,
    optimizer: RouteOptimizer,
    eligibility: Eligibility,
    logger: DynLogger,
}

impl RoutePlanningService {
    pub fn new(
        container_source: Arc<dyn ContainerSource>,
        optimizer: RouteOptimizer,
        eligibility: Eligibility,
        logger: DynLogger,
    ) -> Self {
        Self {
            container_source,
            optimizer,
            eligibility,
            logger,
        }
    }

    pub fn from_config(config: &Config, container_source: Arc<dyn ContainerSource>, logger: DynLogger) -> Self {
        Self::new(
            container_source,
            RouteOptimizer::new(config.priority_weights(), config.metrics()),
            config.eligibility(),
            logger,
        )
    }

    pub fn load_snapshot(&self) -> ApplicationResult<ContainerSnapshot> {
        let snapshot = self.container_source.load_snapshot()?;
        self.logger
            .info(&format!("Loaded snapshot with {} containers", snapshot.len()));
        Ok(snapshot)
    }

    pub fn statistics(&self) -> ApplicationResult<FleetStatistics> {
        Ok(self.load_snapshot()?.statistics())
    }

    /// Containers that pass the configured eligibility filter, in snapshot order.
    pub fn eligible_containers(&self) -> ApplicationResult<Vec<Container>> {
        let snapshot = self.load_snapshot()?;
        Ok(self.eligibility.filter(&snapshot.containers))
    }

    pub fn plan_route(&self, start: GeoPoint) -> ApplicationResult<RoutePlan> {
        let candidates = self.eligible_containers()?;
        let plan = self.optimizer.optimize(&candidates, start)?;
        self.logger.info(&format!(
            "Planned route {} from {}: {} stops, {:.2} km, ~{} min",
            plan.id(),
            start,
            plan.len(),
            plan.total_distance_km(),
            plan.estimated_minutes()
        ));
        Ok(plan)
    }

    /// Plan from the device position, or from `fallback` when the device
    /// cannot provide one.
    pub async fn plan_route_from_device(
        &self,
        location: &dyn LocationSource,
        options: WatchOptions,
        fallback: GeoPoint,
    ) -> ApplicationResult<RoutePlan> {
        let start = resolve_start_location(location, options, fallback, self.logger.as_ref()).await;
        self.plan_route(start)
    }
}

/// One-shot position request that degrades to `fallback` on any location failure.
pub async fn resolve_start_location(
    location: &dyn LocationSource,
    options: WatchOptions,
    fallback: GeoPoint,
    logger: &dyn DomainLogger,
) -> GeoPoint {
    match location.current_fix(options).await {
        Ok(fix) => GeoPoint {
            lat: fix.lat,
            lng: fix.lng,
        },
        Err(e) => {
            logger.warn(&format!("{}; starting from fallback location {}", e, fallback));
            fallback
        }
    }
}
