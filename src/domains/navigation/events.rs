use crate::common::DomainEvent;
use crate::domains::containers::Container;
use crate::domains::routing::RoutePlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEvent {
    SessionStarted {
        session_id: String,
        plan: RoutePlan,
        timestamp: DateTime<Utc>,
    },
    Approaching {
        session_id: String,
        step_index: usize,
        container: Container,
        distance_meters: f64,
        bucket: u32,
        timestamp: DateTime<Utc>,
    },
    Arrived {
        session_id: String,
        step_index: usize,
        container: Container,
        timestamp: DateTime<Utc>,
    },
    AdvancedTo {
        session_id: String,
        step_index: usize,
        container: Container,
        timestamp: DateTime<Utc>,
    },
    RouteCompleted {
        session_id: String,
        plan_id: String,
        completed_count: usize,
        timestamp: DateTime<Utc>,
    },
    SessionCancelled {
        session_id: String,
        step_index: usize,
        completed_count: usize,
        timestamp: DateTime<Utc>,
    },
    SessionReset {
        session_id: String,
        timestamp: DateTime<Utc>,
    },
    PlanReplaced {
        session_id: String,
        plan: RoutePlan,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NavigationEvent::SessionStarted { .. } => "SessionStarted",
            NavigationEvent::Approaching { .. } => "Approaching",
            NavigationEvent::Arrived { .. } => "Arrived",
            NavigationEvent::AdvancedTo { .. } => "AdvancedTo",
            NavigationEvent::RouteCompleted { .. } => "RouteCompleted",
            NavigationEvent::SessionCancelled { .. } => "SessionCancelled",
            NavigationEvent::SessionReset { .. } => "SessionReset",
            NavigationEvent::PlanReplaced { .. } => "PlanReplaced",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            NavigationEvent::SessionStarted { session_id, .. } => session_id,
            NavigationEvent::Approaching { session_id, .. } => session_id,
            NavigationEvent::Arrived { session_id, .. } => session_id,
            NavigationEvent::AdvancedTo { session_id, .. } => session_id,
            NavigationEvent::RouteCompleted { session_id, .. } => session_id,
            NavigationEvent::SessionCancelled { session_id, .. } => session_id,
            NavigationEvent::SessionReset { session_id, .. } => session_id,
            NavigationEvent::PlanReplaced { session_id, .. } => session_id,
        }
    }

    fn event_version(&self) -> u64 { 1 }

    fn step_index(&self) -> Option<usize> {
        match self {
            NavigationEvent::Approaching { step_index, .. }
            | NavigationEvent::Arrived { step_index, .. }
            | NavigationEvent::AdvancedTo { step_index, .. }
            | NavigationEvent::SessionCancelled { step_index, .. } => Some(*step_index),
            _ => None,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NavigationEvent::SessionStarted { timestamp, .. } => *timestamp,
            NavigationEvent::Approaching { timestamp, .. } => *timestamp,
            NavigationEvent::Arrived { timestamp, .. } => *timestamp,
            NavigationEvent::AdvancedTo { timestamp, .. } => *timestamp,
            NavigationEvent::RouteCompleted { timestamp, .. } => *timestamp,
            NavigationEvent::SessionCancelled { timestamp, .. } => *timestamp,
            NavigationEvent::SessionReset { timestamp, .. } => *timestamp,
            NavigationEvent::PlanReplaced { timestamp, .. } => *timestamp,
        }
    }
}
