use crate::common::DomainResult;
use crate::domains::geo::Coordinate;
use crate::domains::navigation::LocationFix;
use crate::domains::routing::RoutePlan;
use chrono::Utc;
use rand::Rng;

const METERS_PER_DEGREE: f64 = 111_320.0;

/// Fakes a drive along a plan: straight legs from the start through every
/// stop, with GPS-like noise on each fix.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTrack {
    pub fixes_per_leg: usize,
    /// Noise applied to every fix. Keep it under the arrival threshold or
    /// stops may be missed.
    pub jitter_meters: f64,
    pub accuracy_meters: f64,
}

impl Default for SimulatedTrack {
    fn default() -> Self {
        Self {
            fixes_per_leg: 8,
            jitter_meters: 5.0,
            accuracy_meters: 10.0,
        }
    }
}

impl SimulatedTrack {
    pub fn generate(&self, plan: &RoutePlan) -> DomainResult<Vec<LocationFix>> {
        self.generate_with(plan, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(&self, plan: &RoutePlan, rng: &mut R) -> DomainResult<Vec<LocationFix>> {
        let steps = self.fixes_per_leg.max(1);
        let mut fixes = Vec::with_capacity(plan.len() * steps);
        let mut from = plan.start();

        for stop in plan.stops() {
            let to = stop.to_point();
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                let lat = from.lat + (to.lat - from.lat) * t + self.noise(rng);
                let lng = from.lng + (to.lng - from.lng) * t + self.noise(rng);
                fixes.push(LocationFix::new(
                    lat.clamp(-90.0, 90.0),
                    lng.clamp(-180.0, 180.0),
                    self.accuracy_meters,
                    Utc::now(),
                )?);
            }
            from = to;
        }

        Ok(fixes)
    }

    fn noise<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.jitter_meters <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-self.jitter_meters..self.jitter_meters) / METERS_PER_DEGREE
    }
}
