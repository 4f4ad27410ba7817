use super::NavigationSession;
use crate::common::{AggregateRoot, DomainResult};
use crate::domains::navigation::events::NavigationEvent;
use crate::domains::navigation::types::NavigationStatus;

impl AggregateRoot for NavigationSession {
	type Event = NavigationEvent;

	fn aggregate_id(&self) -> &str { &self.id }
	fn version(&self) -> u64 { self.version }
	fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
		match event {
			NavigationEvent::SessionStarted { plan, .. } => {
				self.plan = Some(plan.clone());
				self.status = NavigationStatus::Active;
				self.current_step_index = 0;
				self.completed_steps.clear();
				self.closest_approach_bucket = None;
			}
			NavigationEvent::Approaching { bucket, .. } => {
				self.closest_approach_bucket = Some(
					self.closest_approach_bucket.map_or(*bucket, |closest| closest.min(*bucket)),
				);
			}
			NavigationEvent::Arrived { container, .. } => {
				self.completed_steps.insert(container.id().clone());
				self.closest_approach_bucket = None;
			}
			NavigationEvent::AdvancedTo { step_index, .. } => {
				self.current_step_index = *step_index;
				self.closest_approach_bucket = None;
			}
			NavigationEvent::RouteCompleted { .. } => {
				self.status = NavigationStatus::Completed;
				let len = self.plan.as_ref().map_or(0, |p| p.len());
				self.current_step_index = len.saturating_sub(1);
				self.closest_approach_bucket = None;
			}
			NavigationEvent::SessionCancelled { .. } => {
				self.status = NavigationStatus::Cancelled;
				self.current_step_index = 0;
				self.completed_steps.clear();
				self.closest_approach_bucket = None;
			}
			NavigationEvent::SessionReset { .. } => {
				self.status = NavigationStatus::Idle;
				self.current_step_index = 0;
				self.completed_steps.clear();
				self.closest_approach_bucket = None;
			}
			NavigationEvent::PlanReplaced { plan, .. } => {
				self.plan = Some(plan.clone());
				self.current_step_index = 0;
				self.completed_steps.clear();
				self.closest_approach_bucket = None;
			}
		}
		self.version += 1;
		Ok(())
	}
	fn uncommitted_events(&self) -> &[Self::Event] {
		NavigationSession::uncommitted_events(self)
	}
	fn mark_events_as_committed(&mut self) {
		NavigationSession::mark_events_as_committed(self)
	}
	fn add_event(&mut self, event: Self::Event) {
		NavigationSession::add_event(self, event)
	}
}
