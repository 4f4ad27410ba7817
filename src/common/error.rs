use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Fill level {value} is outside 0..=100")]
    OutOfRangeFillLevel { value: i64 },

    #[error("Bearing is undefined for a zero-length segment")]
    DegenerateBearing,

    #[error("Cannot build a route from an empty container set")]
    EmptyContainerSet,

    #[error("Container {id} appears more than once in the snapshot")]
    DuplicateContainer { id: String },

    #[error("Navigation session {session_id} is already active")]
    AlreadyActive { session_id: String },

    #[error("Navigation session {session_id} is busy following a route")]
    SessionBusy { session_id: String },

    #[error("Navigation session {session_id} is not active")]
    NotActive { session_id: String },

    #[error("Cannot {action} while session is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

/// Failures reported by a location source. Pure components never produce these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Unknown location error")]
    Unknown,
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Event store error: {0}")]
    EventStore(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
