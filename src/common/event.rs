use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn aggregate_id(&self) -> &str;
    fn event_version(&self) -> u64;
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Route step the event refers to, for events tied to one stop.
    fn step_index(&self) -> Option<usize> {
        None
    }
}

/// Journaled form of a navigation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub event_type: String,
    pub event_version: u64,
    pub step_index: Option<usize>,
    pub event_data: serde_json::Value,
    pub metadata: EventMetadata,
    pub occurred_at: DateTime<Utc>,
}

/// Who drove the session and which route plan it was following.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Shared by every event of one session run.
    pub correlation_id: Option<Uuid>,
    /// Previous journaled event of the same session.
    pub causation_id: Option<Uuid>,
    /// Crew or vehicle the session belongs to, when known.
    pub operator_id: Option<String>,
    pub plan_id: Option<String>,
    pub source: String,
}

impl EventMetadata {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_operator(mut self, operator_id: Option<String>) -> Self {
        self.operator_id = operator_id;
        self
    }

    pub fn with_plan(mut self, plan_id: Option<String>) -> Self {
        self.plan_id = plan_id;
        self
    }

    pub fn correlated_with(mut self, correlation_id: Option<Uuid>) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn caused_by(mut self, event_id: Option<Uuid>) -> Self {
        self.causation_id = event_id;
        self
    }
}

impl EventEnvelope {
    pub fn new<E: DomainEvent + Serialize>(
        event: &E,
        aggregate_type: &str,
        metadata: EventMetadata,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            aggregate_id: event.aggregate_id().to_string(),
            aggregate_type: aggregate_type.to_string(),
            event_type: event.event_type().to_string(),
            event_version: event.event_version(),
            step_index: event.step_index(),
            event_data: serde_json::to_value(event)?,
            metadata,
            occurred_at: event.occurred_at(),
        })
    }

    /// Decode the payload back into the typed event.
    pub fn decode<E: for<'de> Deserialize<'de>>(&self) -> Result<E, serde_json::Error> {
        serde_json::from_value(self.event_data.clone())
    }

    pub fn belongs_to_plan(&self, plan_id: &str) -> bool {
        self.metadata.plan_id.as_deref() == Some(plan_id)
    }
}

#[async_trait::async_trait]
pub trait EventStore {
    /// Append events for one aggregate. `expected_version` is the number of
    /// events already stored for it; `None` skips the check.
    async fn append_events(
        &self,
        aggregate_id: &str,
        expected_version: Option<u64>,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String>;

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_version: u64,
    ) -> Result<Vec<EventEnvelope>, String>;

    async fn load_events_by_type(
        &self,
        event_type: &str,
        from_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventEnvelope>, String>;

    /// Every journaled event recorded while a session followed `plan_id`,
    /// in occurrence order.
    async fn load_events_for_plan(&self, plan_id: &str) -> Result<Vec<EventEnvelope>, String>;
}
