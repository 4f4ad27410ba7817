//! Fill level → urgency class and distance discount.

use crate::common::{DomainError, DomainResult};
use crate::domains::containers::Container;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive) of the `Low` band.
pub const LOW_MAX_FILL: i64 = 30;
/// Upper bound (inclusive) of the `Medium` band; anything above is critical.
pub const CRITICAL_ABOVE_FILL: i64 = 70;
/// Height of the standard container used by the ultrasonic sensors.
pub const DEFAULT_CONTAINER_HEIGHT_CM: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyClass {
    Low,
    Medium,
    Critical,
}

impl fmt::Display for UrgencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UrgencyClass::Low => "LOW",
            UrgencyClass::Medium => "MEDIUM",
            UrgencyClass::Critical => "CRITICAL",
        })
    }
}

pub fn classify(fill_level: i64) -> DomainResult<UrgencyClass> {
    match fill_level {
        value if !(0..=100).contains(&value) => Err(DomainError::OutOfRangeFillLevel { value }),
        value if value > CRITICAL_ABOVE_FILL => Ok(UrgencyClass::Critical),
        value if value > LOW_MAX_FILL => Ok(UrgencyClass::Medium),
        _ => Ok(UrgencyClass::Low),
    }
}

/// Urgency of a validated container; cannot fail.
pub fn urgency_of(container: &Container) -> UrgencyClass {
    if i64::from(container.fill_level()) > CRITICAL_ABOVE_FILL {
        UrgencyClass::Critical
    } else if i64::from(container.fill_level()) > LOW_MAX_FILL {
        UrgencyClass::Medium
    } else {
        UrgencyClass::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopContext {
    /// From the operator/start location to the first stop.
    FirstHop,
    /// Between two stops already in the sequence.
    SubsequentHop,
}

/// Critical-container distance discounts. The first hop is discounted less
/// than later hops so the opening stop stays close to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub first_hop_critical: f64,
    pub subsequent_hop_critical: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            first_hop_critical: 0.8,
            subsequent_hop_critical: 0.7,
        }
    }
}

impl PriorityWeights {
    pub fn weight(&self, fill_level: u8, context: HopContext) -> f64 {
        if i64::from(fill_level) <= CRITICAL_ABOVE_FILL {
            return 1.0;
        }
        match context {
            HopContext::FirstHop => self.first_hop_critical,
            HopContext::SubsequentHop => self.subsequent_hop_critical,
        }
    }
}

/// Weight with the default table.
pub fn priority_weight(fill_level: u8, context: HopContext) -> f64 {
    PriorityWeights::default().weight(fill_level, context)
}

/// Sort key for urgency listings: critical containers get a +50 boost.
pub fn priority_score(fill_level: u8) -> u32 {
    let fill = u32::from(fill_level);
    if i64::from(fill_level) > CRITICAL_ABOVE_FILL {
        fill + 50
    } else {
        fill
    }
}

/// Most urgent first; equal scores keep snapshot order.
pub fn sort_by_priority(containers: &[Container]) -> Vec<Container> {
    let mut sorted = containers.to_vec();
    sorted.sort_by_key(|c| std::cmp::Reverse(priority_score(c.fill_level())));
    sorted
}

/// Which containers a call site considers worth a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Strict lower bound on the fill level.
    pub min_fill_exclusive: u8,
}

impl Eligibility {
    pub fn above(min_fill_exclusive: u8) -> Self {
        Self { min_fill_exclusive }
    }

    /// Critical containers only (> 70%).
    pub fn critical_only() -> Self {
        Self::above(CRITICAL_ABOVE_FILL as u8)
    }

    /// Everything that needs collecting soon (> 50%).
    pub fn collection() -> Self {
        Self::above(50)
    }

    pub fn admits(&self, container: &Container) -> bool {
        container.fill_level() > self.min_fill_exclusive
    }

    pub fn filter(&self, containers: &[Container]) -> Vec<Container> {
        containers.iter().filter(|c| self.admits(c)).cloned().collect()
    }
}

/// Converts an ultrasonic sensor reading (distance from the lid to the
/// contents) into a whole fill percentage.
pub fn fill_level_from_distance(distance_cm: f64, container_height_cm: f64) -> DomainResult<u8> {
    if !(container_height_cm > 0.0) {
        return Err(DomainError::InvalidCommand {
            reason: format!("container height must be positive, got {}", container_height_cm),
        });
    }
    if distance_cm.is_nan() {
        return Err(DomainError::InvalidCommand {
            reason: "sensor distance is NaN".to_string(),
        });
    }
    let percent = (container_height_cm - distance_cm) / container_height_cm * 100.0;
    Ok(percent.clamp(0.0, 100.0).round() as u8)
}
