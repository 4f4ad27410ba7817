use super::plan::RoutePlan;
use crate::common::DomainResult;
use crate::domains::containers::ContainerId;
use crate::domains::geo::{bearing_degrees, compass_label, distance_km, format_distance, CompassLabel, Coordinate};
use crate::domains::priority::{urgency_of, UrgencyClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionStep {
    /// 1-based position in the route.
    pub step_number: usize,
    pub container_id: ContainerId,
    pub fill_level: u8,
    pub urgency: UrgencyClass,
    /// Leg length from the previous stop, or from the start for the first step.
    pub distance_meters: f64,
    /// `None` for the first step and for zero-length legs.
    pub heading: Option<CompassLabel>,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_stops: usize,
    pub critical_stops: usize,
    pub total_distance_km: f64,
    pub estimated_minutes: u32,
}

/// Step-by-step instructions for a plan.
pub fn directions(plan: &RoutePlan) -> DomainResult<Vec<DirectionStep>> {
    let mut steps = Vec::with_capacity(plan.len());
    let start = plan.start();

    for (index, container) in plan.stops().iter().enumerate() {
        let (distance_meters, heading, instruction) = if index == 0 {
            let meters = distance_km(&start, container)? * 1000.0;
            let text = if meters > 0.0 {
                format!(
                    "Head to container {} ({} from your location)",
                    container.id(),
                    format_distance(meters)
                )
            } else {
                format!("Head to container {}", container.id())
            };
            (meters, None, text)
        } else {
            let previous = &plan.stops()[index - 1];
            let meters = distance_km(previous, container)? * 1000.0;
            let heading = leg_heading(previous, container)?;
            let text = match heading {
                Some(label) => format!("Continue {} to container {}", label, container.id()),
                None => format!("Continue to container {}", container.id()),
            };
            (meters, heading, text)
        };

        steps.push(DirectionStep {
            step_number: index + 1,
            container_id: container.id().clone(),
            fill_level: container.fill_level(),
            urgency: urgency_of(container),
            distance_meters,
            heading,
            instruction,
        });
    }

    Ok(steps)
}

fn leg_heading<A: Coordinate, B: Coordinate>(from: &A, to: &B) -> DomainResult<Option<CompassLabel>> {
    if from.lat() == to.lat() && from.lng() == to.lng() {
        return Ok(None);
    }
    Ok(Some(compass_label(bearing_degrees(from, to)?)))
}

pub fn summary(plan: &RoutePlan) -> RouteSummary {
    RouteSummary {
        total_stops: plan.len(),
        critical_stops: plan.critical_count(),
        total_distance_km: plan.total_distance_km(),
        estimated_minutes: plan.estimated_minutes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::containers::Container;
    use crate::domains::geo::GeoPoint;
    use crate::domains::routing::optimize;
    use chrono::Utc;

    #[test]
    fn zero_length_leg_has_no_heading() {
        let now = Utc::now();
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        let plan = optimize(
            &[
                Container::new("A", 0.001, 0.0, 80, now).unwrap(),
                Container::new("B", 0.001, 0.0, 60, now).unwrap(),
                Container::new("C", 0.003, 0.0, 60, now).unwrap(),
            ],
            start,
        )
        .unwrap();

        let steps = directions(&plan).unwrap();
        assert_eq!(steps.len(), 3);
        assert!(steps[0].instruction.starts_with("Head to container A"));
        assert_eq!(steps[1].heading, None);
        assert_eq!(steps[1].distance_meters, 0.0);
        assert_eq!(steps[2].heading, Some(CompassLabel::N));
        assert_eq!(steps[2].instruction, "Continue north to container C");
    }
}
