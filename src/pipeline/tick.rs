// src/pipeline/tick.rs
//
// Per-tick input and output records for the orchestrator.

use crate::error::ControlFault;
use crate::types::{
    BeamMode, DetectedVehicle, HazardReport, OvertakingStatus, Position, SystemState,
    TurnSignalState, Velocity,
};
use serde::{Deserialize, Serialize};

/// Motion / bus signals sampled for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Degrees, +left
    pub steering_angle: f64,
    /// Degrees per second, +left
    pub yaw_rate: f64,
    pub ego_velocity: Velocity,
    pub engine_rpm: f64,
}

impl Default for MotionSample {
    /// Straight, stationary, engine running.
    fn default() -> Self {
        Self {
            steering_angle: 0.0,
            yaw_rate: 0.0,
            ego_velocity: Velocity::default(),
            engine_rpm: 2000.0,
        }
    }
}

pub struct TickInput<'a> {
    /// Elapsed time since the previous tick (seconds)
    pub dt: f64,
    /// Absolute ego position
    pub ego_position: Position,
    /// Complete set of detections visible this tick
    pub detections: &'a [DetectedVehicle],
    pub motion: MotionSample,
}

impl<'a> TickInput<'a> {
    pub fn new(dt: f64, ego_position: Position, detections: &'a [DetectedVehicle]) -> Self {
        Self {
            dt,
            ego_position,
            detections,
            motion: MotionSample::default(),
        }
    }

    pub fn with_motion(mut self, motion: MotionSample) -> Self {
        self.motion = motion;
        self
    }
}

/// Read-only actuator outputs for a downstream hardware driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActuatorOutputs {
    pub beam_mode: BeamMode,
    pub physical_beam: BeamMode,
    pub blinking: bool,
    pub horn_active: bool,
    pub turn_signal: TurnSignalState,
    pub turn_signal_lit: bool,
}

/// What happened during one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub system_state: SystemState,
    pub lateral_velocity: f64,
    pub stalled: bool,
    pub hazard: HazardReport,
    pub overtaking_status: OvertakingStatus,
    /// Beam chosen by the decision engine; None when the normal path was skipped
    pub target_beam: Option<BeamMode>,
    pub fault: Option<ControlFault>,
    /// Actuator outputs after advancing by dt
    pub outputs: ActuatorOutputs,
}

impl TickReport {
    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    pub fn is_hazard(&self) -> bool {
        self.hazard.is_hazard()
    }
}
