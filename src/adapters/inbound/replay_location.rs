use crate::common::{DomainError, DomainResult, LocationError};
use crate::domains::navigation::{
    LocationFix, LocationSource, LocationSubscription, LocationUpdate, SubscriptionHandle,
    WatchOptions,
};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One line of a recorded track file: either a position or a reported failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TrackEntry {
    Failure {
        error: LocationError,
    },
    Point {
        lat: f64,
        lng: f64,
        #[serde(default)]
        accuracy_meters: f64,
    },
}

/// Plays back a fixed sequence of location updates, one per `interval`.
/// Fixes are restamped with the time they are delivered.
pub struct ReplayLocationSource {
    updates: Vec<LocationUpdate>,
    interval: Duration,
    watches: Mutex<HashMap<SubscriptionHandle, JoinHandle<()>>>,
}

impl ReplayLocationSource {
    pub fn new(updates: Vec<LocationUpdate>, interval: Duration) -> Self {
        Self {
            updates,
            interval,
            watches: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_fixes(fixes: Vec<LocationFix>, interval: Duration) -> Self {
        Self::new(fixes.into_iter().map(Ok).collect(), interval)
    }

    /// Load a track from a JSON array of `{lat, lng, accuracy_meters?}` or
    /// `{error: "Timeout"}` entries.
    pub fn from_json(json: &str, interval: Duration) -> DomainResult<Self> {
        let entries: Vec<TrackEntry> = serde_json::from_str(json)?;
        let mut updates = Vec::with_capacity(entries.len());
        for entry in entries {
            updates.push(match entry {
                TrackEntry::Failure { error } => Err(error),
                TrackEntry::Point {
                    lat,
                    lng,
                    accuracy_meters,
                } => Ok(LocationFix::new(lat, lng, accuracy_meters, Utc::now())?),
            });
        }
        Ok(Self::new(updates, interval))
    }

    pub async fn from_json_file<P: AsRef<Path>>(path: P, interval: Duration) -> DomainResult<Self> {
        let content = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&content, interval)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Number of watches still registered.
    pub fn active_watches(&self) -> usize {
        self.watches.lock().map(|w| w.len()).unwrap_or(0)
    }
}

fn restamp(update: LocationUpdate) -> LocationUpdate {
    update.map(|mut fix| {
        fix.captured_at = Utc::now();
        fix
    })
}

#[async_trait]
impl LocationSource for ReplayLocationSource {
    fn watch(&self, _options: WatchOptions) -> DomainResult<LocationSubscription> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DomainError::InfrastructureError(format!("no async runtime for watch: {}", e)))?;

        let (tx, rx) = mpsc::channel(self.updates.len().max(1));
        let updates = self.updates.clone();
        let interval = self.interval;

        let task = runtime.spawn(async move {
            for update in updates {
                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                if tx.send(restamp(update)).await.is_err() {
                    break;
                }
            }
        });

        let handle = SubscriptionHandle::new();
        let mut watches = self
            .watches
            .lock()
            .map_err(|_| DomainError::InfrastructureError("watch registry poisoned".to_string()))?;
        watches.insert(handle, task);

        Ok(LocationSubscription {
            handle,
            updates: rx,
        })
    }

    fn stop(&self, handle: SubscriptionHandle) {
        if let Ok(mut watches) = self.watches.lock() {
            if let Some(task) = watches.remove(&handle) {
                task.abort();
            }
        }
    }

    async fn current_fix(&self, _options: WatchOptions) -> LocationUpdate {
        match self.updates.first() {
            Some(update) => restamp(*update),
            None => Err(LocationError::Unavailable),
        }
    }
}
