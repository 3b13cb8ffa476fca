// src/sensor.rs
//
// Sensor boundary. A source yields the complete set of visible vehicles
// for one tick; physical drivers live outside this crate.

use crate::error::SensorError;
use crate::types::DetectedVehicle;

pub trait DetectionSource {
    fn read_detections(&mut self) -> Result<Vec<DetectedVehicle>, SensorError>;
}

/// In-memory source for simulation and tests.
#[derive(Debug, Default)]
pub struct MockSensor {
    vehicles: Vec<DetectedVehicle>,
    pending_failure: Option<SensorError>,
}

impl MockSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<DetectedVehicle>) {
        self.vehicles = vehicles;
    }

    /// Make the next read fail once as unavailable with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next_with(SensorError::Unavailable(reason.into()));
    }

    /// Make the next read fail once with `error`.
    pub fn fail_next_with(&mut self, error: SensorError) {
        self.pending_failure = Some(error);
    }
}

impl DetectionSource for MockSensor {
    fn read_detections(&mut self) -> Result<Vec<DetectedVehicle>, SensorError> {
        if let Some(error) = self.pending_failure.take() {
            return Err(error);
        }
        Ok(self.vehicles.clone())
    }
}
