use super::NavigationSession;
use crate::common::{AggregateRoot, DomainResult};
use crate::domains::geo::distance_km;
use crate::domains::navigation::events::NavigationEvent;
use crate::domains::navigation::types::{LocationFix, NavigationStatus};
use chrono::Utc;

impl NavigationSession {
	/// Feed one location fix and return the events it produced.
	///
	/// The fix always becomes `last_known_location`. Proximity is only
	/// evaluated while active, on raw distance: accuracy never holds back an
	/// arrival.
	pub fn on_location_fix(&mut self, fix: LocationFix) -> DomainResult<Vec<NavigationEvent>> {
		fix.validate()?;
		self.last_known_location = Some(fix);

		if self.status != NavigationStatus::Active {
			return Ok(Vec::new());
		}
		let Some(target) = self.current_target().cloned() else {
			return Ok(Vec::new());
		};

		let before = self.uncommitted_events().len();
		let distance_meters = distance_km(&fix, &target)? * 1000.0;
		let step_index = self.current_step_index;

		if distance_meters <= self.settings.arrival_threshold_meters {
			self.record(NavigationEvent::Arrived {
				session_id: self.id.clone(),
				step_index,
				container: target,
				timestamp: Utc::now(),
			})?;
			self.advance_from(step_index)?;
		} else if distance_meters <= self.settings.approach_radius_meters() {
			let bucket = self.settings.approach_bucket(distance_meters);
			if self.closest_approach_bucket.map_or(true, |closest| bucket < closest) {
				self.record(NavigationEvent::Approaching {
					session_id: self.id.clone(),
					step_index,
					container: target,
					distance_meters,
					bucket,
					timestamp: Utc::now(),
				})?;
			}
		}

		Ok(self.uncommitted_events()[before..].to_vec())
	}

	fn advance_from(&mut self, step_index: usize) -> DomainResult<()> {
		let next_index = step_index + 1;
		let next = self.plan.as_ref().and_then(|p| p.stop(next_index)).cloned();
		match next {
			Some(container) => self.record(NavigationEvent::AdvancedTo {
				session_id: self.id.clone(),
				step_index: next_index,
				container,
				timestamp: Utc::now(),
			}),
			None => self.record(NavigationEvent::RouteCompleted {
				session_id: self.id.clone(),
				plan_id: self.plan.as_ref().map(|p| p.id().to_string()).unwrap_or_default(),
				completed_count: self.completed_steps.len(),
				timestamp: Utc::now(),
			}),
		}
	}
}
