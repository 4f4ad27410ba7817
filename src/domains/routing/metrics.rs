use crate::common::DomainResult;
use crate::domains::geo::{distance_km, Coordinate};
use serde::{Deserialize, Serialize};

/// Travel-time model for an urban collection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub driving_minutes_per_km: f64,
    pub per_stop_minutes: f64,
    /// Extra minutes per km for congestion.
    pub traffic_buffer_factor: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            driving_minutes_per_km: 2.0,
            per_stop_minutes: 3.0,
            traffic_buffer_factor: 0.5,
        }
    }
}

impl MetricsConfig {
    pub fn estimated_minutes(&self, distance_km: f64, stop_count: usize) -> u32 {
        let minutes = distance_km * self.driving_minutes_per_km
            + stop_count as f64 * self.per_stop_minutes
            + distance_km * self.traffic_buffer_factor;
        minutes.round().max(0.0) as u32
    }
}

/// Length of start → s1 → … → sN in kilometers.
pub fn total_distance<S, C>(start: &S, stops: &[C]) -> DomainResult<f64>
where
    S: Coordinate + ?Sized,
    C: Coordinate,
{
    let Some(first) = stops.first() else {
        return Ok(0.0);
    };
    let mut total = distance_km(start, first)?;
    for pair in stops.windows(2) {
        total += distance_km(&pair[0], &pair[1])?;
    }
    Ok(total)
}

/// [`MetricsConfig::estimated_minutes`] with the default constants.
pub fn estimated_minutes(distance_km: f64, stop_count: usize) -> u32 {
    MetricsConfig::default().estimated_minutes(distance_km, stop_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::geo::GeoPoint;

    #[test]
    fn minutes_formula() {
        // 10 km: 20 driving + 5 buffer; 4 stops: 12
        assert_eq!(estimated_minutes(10.0, 4), 37);
        assert_eq!(estimated_minutes(0.0, 0), 0);
        assert_eq!(estimated_minutes(1.1, 1), 6); // 2.2 + 3 + 0.55 = 5.75
    }

    #[test]
    fn custom_model() {
        let slow = MetricsConfig {
            driving_minutes_per_km: 4.0,
            per_stop_minutes: 5.0,
            traffic_buffer_factor: 1.0,
        };
        assert_eq!(slow.estimated_minutes(2.0, 2), 20);
    }

    #[test]
    fn empty_chain_is_zero() {
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        let stops: Vec<GeoPoint> = Vec::new();
        assert_eq!(total_distance(&start, &stops).unwrap(), 0.0);
    }
}
