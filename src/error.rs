// src/error.rs
//
// Typed failures. Tick faults travel as values up to the orchestrator,
// which is the only place that turns one into SystemState::Error.

use thiserror::Error;

/// Failure reported by a detection source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    #[error("malformed sensor frame: {0}")]
    Malformed(String),
}

/// Fault raised while processing a control tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlFault {
    #[error("detection source failed: {0}")]
    Sensor(#[from] SensorError),

    #[error("non-finite input {field} = {value}")]
    NonFiniteInput { field: &'static str, value: f64 },

    #[error("invalid time step dt = {0}")]
    InvalidTimeStep(f64),
}

pub type ControlResult<T> = Result<T, ControlFault>;

/// Rejected configuration value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
