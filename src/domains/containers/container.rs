use crate::common::{DomainError, DomainResult};
use crate::domains::geo::{self, Coordinate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        ContainerId(s.to_string())
    }
}

impl From<String> for ContainerId {
    fn from(s: String) -> Self {
        ContainerId(s)
    }
}

/// One sensor-equipped waste container as seen in a snapshot.
///
/// Fields are private so every instance went through [`Container::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContainerRecord", into = "ContainerRecord")]
pub struct Container {
    id: ContainerId,
    lat: f64,
    lng: f64,
    fill_level: u8,
    last_updated: DateTime<Utc>,
}

impl Container {
    pub fn new(
        id: impl Into<ContainerId>,
        lat: f64,
        lng: f64,
        fill_level: i64,
        last_updated: DateTime<Utc>,
    ) -> DomainResult<Self> {
        geo::validate(lat, lng)?;
        if !(0..=100).contains(&fill_level) {
            return Err(DomainError::OutOfRangeFillLevel { value: fill_level });
        }
        Ok(Self {
            id: id.into(),
            lat,
            lng,
            fill_level: fill_level as u8,
            last_updated,
        })
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn fill_level(&self) -> u8 {
        self.fill_level
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

impl Coordinate for Container {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

/// Wire shape of a container record. Accepts the field names used by the
/// sensor receiver (`nivel_llenado`, `timestamp`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(alias = "nivel_llenado")]
    pub fill_level: f64,
    #[serde(alias = "timestamp", default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl TryFrom<ContainerRecord> for Container {
    type Error = DomainError;

    fn try_from(r: ContainerRecord) -> DomainResult<Self> {
        if r.fill_level.is_nan() || r.fill_level.fract() != 0.0 {
            return Err(DomainError::InvalidCommand {
                reason: format!("fill level of {} must be a whole percent, got {}", r.id, r.fill_level),
            });
        }
        Container::new(r.id, r.lat, r.lng, r.fill_level as i64, r.last_updated)
    }
}

impl From<Container> for ContainerRecord {
    fn from(c: Container) -> Self {
        Self {
            id: c.id.0,
            lat: c.lat,
            lng: c.lng,
            fill_level: f64::from(c.fill_level),
            last_updated: c.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        let now = Utc::now();
        assert!(matches!(
            Container::new("C1", 91.0, 0.0, 10, now),
            Err(DomainError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Container::new("C1", 0.0, 0.0, 101, now),
            Err(DomainError::OutOfRangeFillLevel { value: 101 })
        ));
        assert!(Container::new("C1", -90.0, 180.0, 0, now).is_ok());
    }

    #[test]
    fn deserializes_receiver_field_names() {
        let json = r#"{"id":"CONT001","lat":-33.4479,"lng":-70.6683,"nivel_llenado":85,"timestamp":"2024-05-01T10:00:00Z"}"#;
        let c: Container = serde_json::from_str(json).unwrap();
        assert_eq!(c.id().as_str(), "CONT001");
        assert_eq!(c.fill_level(), 85);
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"{"id":"X","lat":-33.0,"lng":-70.0,"fill_level":150}"#;
        assert!(serde_json::from_str::<Container>(json).is_err());
    }
}
