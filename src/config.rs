use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domains::geo::GeoPoint;
use crate::domains::navigation::{NavigationSettings, WatchOptions};
use crate::domains::priority::{Eligibility, PriorityWeights};
use crate::domains::routing::MetricsConfig;

/// Environment prefix for layered overrides, e.g. `GIRO__NAVIGATION__ARRIVAL_THRESHOLD_METERS=30`.
pub const ENV_PREFIX: &str = "GIRO";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub routing: RoutingConfig,
    pub navigation: NavigationConfig,
    pub location: LocationConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub first_hop_critical_weight: f64,
    pub subsequent_hop_critical_weight: f64,
    pub driving_minutes_per_km: f64,
    pub per_stop_minutes: f64,
    pub traffic_buffer_factor: f64,
    /// Containers strictly above this fill level are routed.
    pub eligibility_min_fill: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub arrival_threshold_meters: f64,
    pub approach_multiplier: f64,
    pub approach_bucket_meters: f64,
    pub event_channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub fallback_lat: f64,
    pub fallback_lng: f64,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
    pub high_accuracy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: Option<String>,
    pub snapshot_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        let weights = PriorityWeights::default();
        let metrics = MetricsConfig::default();
        Self {
            first_hop_critical_weight: weights.first_hop_critical,
            subsequent_hop_critical_weight: weights.subsequent_hop_critical,
            driving_minutes_per_km: metrics.driving_minutes_per_km,
            per_stop_minutes: metrics.per_stop_minutes,
            traffic_buffer_factor: metrics.traffic_buffer_factor,
            eligibility_min_fill: 50,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let settings = NavigationSettings::default();
        Self {
            arrival_threshold_meters: settings.arrival_threshold_meters,
            approach_multiplier: settings.approach_multiplier,
            approach_bucket_meters: settings.approach_bucket_meters,
            event_channel_capacity: 100,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Santiago city centre
        Self {
            fallback_lat: -33.4489,
            fallback_lng: -70.6693,
            timeout_ms: 10_000,
            maximum_age_ms: 1_000,
            high_accuracy: true,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            snapshot_file: "containers.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Optional TOML file overlaid with `GIRO__SECTION__KEY` environment variables.
    pub fn load_layered<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }
        let config: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.routing;
        for (name, w) in [
            ("first_hop_critical_weight", r.first_hop_critical_weight),
            ("subsequent_hop_critical_weight", r.subsequent_hop_critical_weight),
        ] {
            if !(w > 0.0 && w <= 1.0) {
                bail!("routing.{} must be in (0, 1], got {}", name, w);
            }
        }
        for (name, v) in [
            ("driving_minutes_per_km", r.driving_minutes_per_km),
            ("per_stop_minutes", r.per_stop_minutes),
            ("traffic_buffer_factor", r.traffic_buffer_factor),
        ] {
            if !(v >= 0.0) {
                bail!("routing.{} must be non-negative, got {}", name, v);
            }
        }
        if r.eligibility_min_fill > 100 {
            bail!("routing.eligibility_min_fill must be <= 100");
        }

        let n = &self.navigation;
        if !(n.arrival_threshold_meters > 0.0) {
            bail!("navigation.arrival_threshold_meters must be positive");
        }
        if !(n.approach_multiplier >= 1.0) {
            bail!("navigation.approach_multiplier must be >= 1");
        }
        if !(n.approach_bucket_meters > 0.0) {
            bail!("navigation.approach_bucket_meters must be positive");
        }
        if n.event_channel_capacity == 0 {
            bail!("navigation.event_channel_capacity must be positive");
        }

        GeoPoint::new(self.location.fallback_lat, self.location.fallback_lng)
            .context("location.fallback_lat/fallback_lng")?;
        Ok(())
    }

    pub fn priority_weights(&self) -> PriorityWeights {
        PriorityWeights {
            first_hop_critical: self.routing.first_hop_critical_weight,
            subsequent_hop_critical: self.routing.subsequent_hop_critical_weight,
        }
    }

    pub fn metrics(&self) -> MetricsConfig {
        MetricsConfig {
            driving_minutes_per_km: self.routing.driving_minutes_per_km,
            per_stop_minutes: self.routing.per_stop_minutes,
            traffic_buffer_factor: self.routing.traffic_buffer_factor,
        }
    }

    pub fn eligibility(&self) -> Eligibility {
        Eligibility::above(self.routing.eligibility_min_fill)
    }

    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            arrival_threshold_meters: self.navigation.arrival_threshold_meters,
            approach_multiplier: self.navigation.approach_multiplier,
            approach_bucket_meters: self.navigation.approach_bucket_meters,
        }
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            high_accuracy: self.location.high_accuracy,
            timeout: Duration::from_millis(self.location.timeout_ms),
            maximum_age: Duration::from_millis(self.location.maximum_age_ms),
        }
    }

    /// Start point used when no live fix can be obtained.
    pub fn fallback_location(&self) -> GeoPoint {
        GeoPoint {
            lat: self.location.fallback_lat,
            lng: self.location.fallback_lng,
        }
    }
}
