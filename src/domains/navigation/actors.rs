use super::events::NavigationEvent;
use super::projections::{NavigationJournal, SessionSummary};
use crate::common::{DomainEvent, EventEnvelope, EventMetadata, EventStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

pub const AGGREGATE_TYPE: &str = "NavigationSession";

/// Actor that journals navigation events and keeps the per-session history.
pub struct NavigationEventActor {
    event_store: Arc<dyn EventStore + Send + Sync>,
    journal: Arc<RwLock<NavigationJournal>>,
    event_receiver: mpsc::Receiver<NavigationEvent>,
    operator_id: Option<String>,
    runs: HashMap<String, RunContext>,
}

/// Journal context of one session run, opened by its start event.
#[derive(Debug, Default)]
struct RunContext {
    run_id: Option<Uuid>,
    plan_id: Option<String>,
    last_event_id: Option<Uuid>,
}

impl NavigationEventActor {
    pub fn new(
        event_store: Arc<dyn EventStore + Send + Sync>,
        event_receiver: mpsc::Receiver<NavigationEvent>,
    ) -> Self {
        Self {
            event_store,
            journal: Arc::new(RwLock::new(NavigationJournal::new())),
            event_receiver,
            operator_id: None,
            runs: HashMap::new(),
        }
    }

    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = Some(operator_id.into());
        self
    }

    /// Shared handle to the journal, readable while the actor runs.
    pub fn journal(&self) -> Arc<RwLock<NavigationJournal>> {
        self.journal.clone()
    }

    pub async fn run(&mut self) {
        while let Some(event) = self.event_receiver.recv().await {
            if let Err(e) = self.handle_event(event).await {
                tracing::error!("Failed to journal navigation event: {}", e);
            }
        }
    }

    async fn handle_event(&mut self, event: NavigationEvent) -> Result<(), String> {
        let session_id = event.aggregate_id().to_string();
        let run = self.runs.entry(session_id.clone()).or_default();
        match &event {
            NavigationEvent::SessionStarted { plan, .. } => {
                run.run_id = Some(Uuid::new_v4());
                run.plan_id = Some(plan.id().to_string());
            }
            NavigationEvent::PlanReplaced { plan, .. } => {
                run.plan_id = Some(plan.id().to_string());
            }
            _ => {}
        }

        let metadata = EventMetadata::from_source("NavigationEventActor")
            .correlated_with(run.run_id)
            .caused_by(run.last_event_id)
            .with_operator(self.operator_id.clone())
            .with_plan(run.plan_id.clone());

        let envelope = EventEnvelope::new(&event, AGGREGATE_TYPE, metadata)
            .map_err(|e| format!("Failed to create event envelope: {}", e))?;
        let event_id = envelope.event_id;

        self.event_store
            .append_events(&session_id, None, vec![envelope])
            .await?;
        if let Some(run) = self.runs.get_mut(&session_id) {
            run.last_event_id = Some(event_id);
        }

        self.journal.write().await.apply_event(&event);

        tracing::info!("Journaled navigation event: {}", event.event_type());
        Ok(())
    }

    pub async fn session_summary(&self, session_id: &str) -> Option<SessionSummary> {
        self.journal.read().await.get(session_id).cloned()
    }
}
