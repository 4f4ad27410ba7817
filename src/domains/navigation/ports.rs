use super::types::LocationFix;
use crate::common::{DomainResult, LocationError};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// One item of a watch stream: a fix, or the reason none could be produced.
pub type LocationUpdate = Result<LocationFix, LocationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    /// How long the source may take to produce one fix.
    pub timeout: Duration,
    /// Oldest cached fix the source may hand out instead of a fresh one.
    pub maximum_age: Duration,
}

impl WatchOptions {
    /// First detection after the map loads.
    pub fn initial_detection() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(15),
            maximum_age: Duration::from_secs(60),
        }
    }

    /// Background tracking while no route is followed.
    pub fn continuous_tracking() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5),
        }
    }

    /// One-shot fix used as a route start.
    pub fn route_calculation() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(30),
        }
    }

    /// Live navigation.
    pub fn navigation() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(1),
        }
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::navigation()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub Uuid);

impl SubscriptionHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch-{}", self.0)
    }
}

/// An open watch. The stream ends when the source stops it.
pub struct LocationSubscription {
    pub handle: SubscriptionHandle,
    pub updates: mpsc::Receiver<LocationUpdate>,
}

/// Port to the device positioning service. The engine only consumes it.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Start a continuous watch.
    fn watch(&self, options: WatchOptions) -> DomainResult<LocationSubscription>;

    /// Stop a watch started by [`LocationSource::watch`]. Unknown handles are ignored.
    fn stop(&self, handle: SubscriptionHandle);

    /// One-shot position request.
    async fn current_fix(&self, options: WatchOptions) -> LocationUpdate;
}
