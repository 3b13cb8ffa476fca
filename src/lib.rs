// src/lib.rs
//
// Decision core for automatic headlight, horn and turn-signal control.
// Turns per-tick vehicle detections and ego-motion data into beam mode,
// horn pulses and turn-signal state, with hazard/stall overrides and
// fault containment. The caller drives ticks and supplies dt.

pub mod actuators;
pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sensor;
pub mod types;

pub use config::Config;
pub use diagnostics::{ErrorSink, LogEntry};
pub use error::{ConfigError, ControlFault, ControlResult, SensorError};
pub use pipeline::{ActuatorOutputs, ControlOrchestrator, MotionSample, TickInput, TickReport};
pub use sensor::{DetectionSource, MockSensor};
pub use types::{
    BeamMode, DetectedVehicle, HazardReport, HazardType, OvertakingStatus, Position,
    SystemState, TurnSignalState, VehicleKind, Velocity,
};
