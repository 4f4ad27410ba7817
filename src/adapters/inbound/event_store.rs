use crate::common::{EventEnvelope, EventStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Event store kept in process memory. Navigation journals do not outlive the
/// process that produced them.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    pub async fn event_count(&self, aggregate_id: &str) -> usize {
        self.events
            .read()
            .await
            .get(aggregate_id)
            .map(|e| e.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append_events(
        &self,
        aggregate_id: &str,
        expected_version: Option<u64>,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        let mut store = self.events.write().await;

        let aggregate_events = store.entry(aggregate_id.to_string()).or_default();

        let current_version = aggregate_events.len() as u64;
        if let Some(expected) = expected_version {
            if current_version != expected {
                return Err(format!(
                    "Version mismatch for {}: expected {}, got {}",
                    aggregate_id, expected, current_version
                ));
            }
        }

        aggregate_events.extend(events);
        Ok(())
    }

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_version: u64,
    ) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;

        Ok(store
            .get(aggregate_id)
            .map(|events| events.iter().skip(from_version as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn load_events_by_type(
        &self,
        event_type: &str,
        from_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;

        let mut filtered: Vec<EventEnvelope> = store
            .values()
            .flatten()
            .filter(|e| e.event_type == event_type)
            .filter(|e| from_timestamp.map_or(true, |ts| e.occurred_at >= ts))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));
        Ok(filtered)
    }

    async fn load_events_for_plan(&self, plan_id: &str) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;

        let mut filtered: Vec<EventEnvelope> = store
            .values()
            .flatten()
            .filter(|e| e.belongs_to_plan(plan_id))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));
        Ok(filtered)
    }
}
