// Navigation read models
use super::events::NavigationEvent;
use super::session::NavigationSession;
use crate::domains::containers::ContainerId;
use crate::domains::geo::distance_km;
use crate::domains::priority::{urgency_of, UrgencyClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distance at which the per-target progress bar starts filling.
pub const TARGET_PROGRESS_RANGE_METERS: f64 = 200.0;

/// What the navigation panel shows for the current target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationOverview {
    pub target_id: ContainerId,
    pub target_fill_level: u8,
    pub target_urgency: UrgencyClass,
    /// `None` until the first fix arrives.
    pub distance_meters: Option<f64>,
    pub target_progress_percent: f64,
    pub route_progress_percent: f64,
    pub step_number: usize,
    pub total_steps: usize,
}

impl NavigationSession {
    pub fn overview(&self) -> Option<NavigationOverview> {
        let target = self.current_target()?;
        let total_steps = self.plan()?.len();
        let distance_meters = self
            .last_known_location()
            .and_then(|fix| distance_km(fix, target).ok())
            .map(|km| km * 1000.0);
        let target_progress_percent = distance_meters
            .map(|d| (100.0 - d / TARGET_PROGRESS_RANGE_METERS * 100.0).max(0.0))
            .unwrap_or(0.0);
        let step_number = self.current_step_index() + 1;

        Some(NavigationOverview {
            target_id: target.id().clone(),
            target_fill_level: target.fill_level(),
            target_urgency: urgency_of(target),
            distance_meters,
            target_progress_percent,
            route_progress_percent: step_number as f64 / total_steps as f64 * 100.0,
            step_number,
            total_steps,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub plan_id: Option<String>,
    pub planned_stops: usize,
    pub collected: Vec<ContainerId>,
    pub approach_notices: usize,
    pub outcome: Option<SessionOutcome>,
    pub last_event_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
}

/// Per-session history built from the event stream.
#[derive(Debug, Clone, Default)]
pub struct NavigationJournal {
    pub sessions: HashMap<String, SessionSummary>,
}

impl NavigationJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_event(&mut self, event: &NavigationEvent) {
        use crate::common::DomainEvent;

        let session_id = event.aggregate_id().to_string();
        let at = event.occurred_at();
        let entry = self
            .sessions
            .entry(session_id.clone())
            .or_insert_with(|| SessionSummary {
                session_id,
                plan_id: None,
                planned_stops: 0,
                collected: Vec::new(),
                approach_notices: 0,
                outcome: None,
                last_event_at: at,
            });
        entry.last_event_at = at;

        match event {
            NavigationEvent::SessionStarted { plan, .. } | NavigationEvent::PlanReplaced { plan, .. } => {
                entry.plan_id = Some(plan.id().to_string());
                entry.planned_stops = plan.len();
                entry.collected.clear();
                entry.approach_notices = 0;
                entry.outcome = None;
            }
            NavigationEvent::Approaching { .. } => entry.approach_notices += 1,
            NavigationEvent::Arrived { container, .. } => entry.collected.push(container.id().clone()),
            NavigationEvent::AdvancedTo { .. } => {}
            NavigationEvent::RouteCompleted { .. } => entry.outcome = Some(SessionOutcome::Completed),
            NavigationEvent::SessionCancelled { .. } => entry.outcome = Some(SessionOutcome::Cancelled),
            NavigationEvent::SessionReset { .. } => entry.outcome = None,
        }
    }

    pub fn get(&self, session_id: &str) -> Option<&SessionSummary> {
        self.sessions.get(session_id)
    }

    pub fn completed_routes(&self) -> usize {
        self.sessions
            .values()
            .filter(|s| s.outcome == Some(SessionOutcome::Completed))
            .count()
    }
}
