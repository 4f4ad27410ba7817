use crate::common::aggregate::AggregateRoot;
use crate::common::{DomainError, DomainResult};
use crate::domains::containers::{Container, ContainerId};
use crate::domains::navigation::events::NavigationEvent;
use crate::domains::navigation::types::{LocationFix, NavigationSettings, NavigationStatus};
use crate::domains::routing::RoutePlan;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Live progress of one operator through a [`RoutePlan`].
///
/// Not internally synchronized: fixes and control calls must be delivered
/// one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationSession {
    pub id: String,
    pub settings: NavigationSettings,
    pub(super) plan: Option<RoutePlan>,
    pub(super) current_step_index: usize,
    pub(super) completed_steps: HashSet<ContainerId>,
    pub(super) status: NavigationStatus,
    pub(super) last_known_location: Option<LocationFix>,
    /// Closest bucket already announced for the current target.
    pub(super) closest_approach_bucket: Option<u32>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<NavigationEvent>,
}

/// `(current_step_index, total_steps, completed_count)` for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationProgress {
    pub current_step_index: usize,
    pub total_steps: usize,
    pub completed_count: usize,
}

impl NavigationProgress {
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.current_step_index, self.total_steps, self.completed_count)
    }
}

impl NavigationSession {
    // Public methods for AggregateRoot trait
    pub fn uncommitted_events(&self) -> &[NavigationEvent] {
        &self.uncommitted_events
    }
    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }
    pub fn add_event(&mut self, event: NavigationEvent) {
        self.uncommitted_events.push(event);
    }
}

impl NavigationSession {
    pub fn new(id: String, settings: NavigationSettings) -> Self {
        Self {
            id,
            settings,
            plan: None,
            current_step_index: 0,
            completed_steps: HashSet::new(),
            status: NavigationStatus::Idle,
            last_known_location: None,
            closest_approach_bucket: None,
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn status(&self) -> NavigationStatus {
        self.status
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn completed_steps(&self) -> &HashSet<ContainerId> {
        &self.completed_steps
    }

    pub fn last_known_location(&self) -> Option<&LocationFix> {
        self.last_known_location.as_ref()
    }

    /// The container currently being driven to, while active.
    pub fn current_target(&self) -> Option<&Container> {
        if self.status != NavigationStatus::Active {
            return None;
        }
        self.plan.as_ref()?.stop(self.current_step_index)
    }

    pub fn progress(&self) -> NavigationProgress {
        NavigationProgress {
            current_step_index: self.current_step_index,
            total_steps: self.plan.as_ref().map_or(0, RoutePlan::len),
            completed_count: self.completed_steps.len(),
        }
    }

    pub fn start(&mut self, plan: RoutePlan) -> DomainResult<()> {
        match self.status {
            NavigationStatus::Idle => {}
            NavigationStatus::Active => {
                return Err(DomainError::AlreadyActive {
                    session_id: self.id.clone(),
                })
            }
            terminal => {
                return Err(DomainError::InvalidTransition {
                    from: terminal.to_string(),
                    action: "start".to_string(),
                })
            }
        }
        if plan.is_empty() {
            return Err(DomainError::EmptyContainerSet);
        }
        self.record(NavigationEvent::SessionStarted {
            session_id: self.id.clone(),
            plan,
            timestamp: Utc::now(),
        })
    }

    /// Abort an active route. Completed routes cannot be cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status != NavigationStatus::Active {
            return Err(DomainError::NotActive {
                session_id: self.id.clone(),
            });
        }
        self.record(NavigationEvent::SessionCancelled {
            session_id: self.id.clone(),
            step_index: self.current_step_index,
            completed_count: self.completed_steps.len(),
            timestamp: Utc::now(),
        })
    }

    /// Swap the plan the next `start` will follow. Refused while active.
    pub fn replace_plan(&mut self, plan: RoutePlan) -> DomainResult<()> {
        if self.status == NavigationStatus::Active {
            return Err(DomainError::SessionBusy {
                session_id: self.id.clone(),
            });
        }
        self.record(NavigationEvent::PlanReplaced {
            session_id: self.id.clone(),
            plan,
            timestamp: Utc::now(),
        })
    }

    /// Return a finished or cancelled session to `Idle`, keeping its plan.
    pub fn reset(&mut self) -> DomainResult<()> {
        match self.status {
            NavigationStatus::Idle => Ok(()),
            NavigationStatus::Active => Err(DomainError::SessionBusy {
                session_id: self.id.clone(),
            }),
            _ => self.record(NavigationEvent::SessionReset {
                session_id: self.id.clone(),
                timestamp: Utc::now(),
            }),
        }
    }
}
