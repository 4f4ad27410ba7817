use crate::common::{DomainError, DomainResult};
use crate::domains::geo::{self, Coordinate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation from a location source. Fixes are handled one at a time
/// in arrival order; `captured_at` is informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_meters: f64,
    pub captured_at: DateTime<Utc>,
}

impl LocationFix {
    pub fn new(lat: f64, lng: f64, accuracy_meters: f64, captured_at: DateTime<Utc>) -> DomainResult<Self> {
        let fix = Self {
            lat,
            lng,
            accuracy_meters,
            captured_at,
        };
        fix.validate()?;
        Ok(fix)
    }

    /// A fix captured now with perfect accuracy.
    pub fn at(lat: f64, lng: f64) -> DomainResult<Self> {
        Self::new(lat, lng, 0.0, Utc::now())
    }

    pub fn validate(&self) -> DomainResult<()> {
        geo::validate(self.lat, self.lng)?;
        if !(self.accuracy_meters >= 0.0) {
            return Err(DomainError::InvalidCommand {
                reason: format!("accuracy must be non-negative, got {}", self.accuracy_meters),
            });
        }
        Ok(())
    }
}

impl Coordinate for LocationFix {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationStatus {
    Idle,
    Active,
    Completed,
    Cancelled,
}

impl NavigationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationStatus::Completed | NavigationStatus::Cancelled)
    }
}

impl fmt::Display for NavigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavigationStatus::Idle => "idle",
            NavigationStatus::Active => "active",
            NavigationStatus::Completed => "completed",
            NavigationStatus::Cancelled => "cancelled",
        })
    }
}

/// Proximity tuning for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationSettings {
    /// Within this distance the current target counts as reached.
    pub arrival_threshold_meters: f64,
    /// Approach zone is `arrival_threshold_meters * approach_multiplier`.
    pub approach_multiplier: f64,
    /// Width of the distance bands used to rate-limit approach notices.
    pub approach_bucket_meters: f64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            arrival_threshold_meters: 50.0,
            approach_multiplier: 3.0,
            approach_bucket_meters: 25.0,
        }
    }
}

impl NavigationSettings {
    pub fn approach_radius_meters(&self) -> f64 {
        self.arrival_threshold_meters * self.approach_multiplier
    }

    pub fn approach_bucket(&self, distance_meters: f64) -> u32 {
        (distance_meters / self.approach_bucket_meters).floor() as u32
    }
}
