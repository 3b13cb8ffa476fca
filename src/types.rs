// src/types.rs
//
// Shared data model for the control core. Positions of detected vehicles
// are relative to the ego vehicle (x lateral, y longitudinal, +y forward),
// velocities are absolute ground-frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Lateral position (meters, +left)
    pub x: f64,
    /// Longitudinal position (meters, +forward)
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance from the origin (the ego vehicle for relative positions)
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Lateral velocity (m/s)
    pub vx: f64,
    /// Longitudinal velocity (m/s)
    pub vy: f64,
}

impl Velocity {
    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    pub fn is_finite(&self) -> bool {
        self.vx.is_finite() && self.vy.is_finite()
    }

    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Oncoming,
    Ahead,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oncoming => "ONCOMING",
            Self::Ahead => "AHEAD",
        }
    }
}

/// A single detection as reported by the sensor boundary.
///
/// `distance` is never trusted: the tracker recomputes it from `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedVehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub position: Position,
    pub velocity: Velocity,
    pub distance: f64,
}

impl DetectedVehicle {
    pub fn new(
        id: u32,
        kind: VehicleKind,
        position: Position,
        velocity: Velocity,
        distance: f64,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            velocity,
            distance,
        }
    }

    /// Structural validity. Ids are non-negative by construction.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.distance >= 0.0
    }

    /// In ego's lane: lateral offset under 1.5 m
    pub fn is_in_ego_lane(&self) -> bool {
        self.position.x.abs() < IN_LANE_HALF_WIDTH_M
    }
}

/// Half-width of the ego lane used for in-lane checks (meters)
pub const IN_LANE_HALF_WIDTH_M: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamMode {
    HighBeam,
    LowBeam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemState {
    Normal,
    Error,
    ManualOverride,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OvertakingStatus {
    None,
    InProgress,
    Complete,
    Aborted,
}

impl OvertakingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::InProgress => "IN_PROGRESS",
            Self::Complete => "COMPLETE",
            Self::Aborted => "ABORTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSignalState {
    Off,
    Left,
    Right,
    Hazard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardType {
    None,
    BlockingVehicle,
}

/// Outcome of a hazard scan: the first matching vehicle, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardReport {
    pub hazard: HazardType,
    pub vehicle_id: Option<u32>,
    pub message: String,
}

impl HazardReport {
    pub fn none() -> Self {
        Self {
            hazard: HazardType::None,
            vehicle_id: None,
            message: String::new(),
        }
    }

    pub fn blocking(vehicle_id: u32, message: impl Into<String>) -> Self {
        Self {
            hazard: HazardType::BlockingVehicle,
            vehicle_id: Some(vehicle_id),
            message: message.into(),
        }
    }

    pub fn is_hazard(&self) -> bool {
        self.hazard != HazardType::None
    }
}
