// src/analysis/beam_decision.rs
//
// Target beam from the tracked set: low beam for any oncoming vehicle or
// any vehicle ahead inside the safe distance, otherwise high beam.
//
// The overtaking status is accepted but does not influence the result.
// Overtaking-specific beam behavior (blinking, oncoming pause) is
// coordinated by the orchestrator.

use crate::config::Config;
use crate::types::{BeamMode, DetectedVehicle, OvertakingStatus, VehicleKind};
use std::sync::Arc;

pub struct BeamDecisionEngine {
    config: Arc<Config>,
}

impl BeamDecisionEngine {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn determine(
        &self,
        tracked: &[DetectedVehicle],
        _overtaking_status: OvertakingStatus,
    ) -> BeamMode {
        if self.requires_low_beam(tracked) {
            BeamMode::LowBeam
        } else {
            BeamMode::HighBeam
        }
    }

    fn requires_low_beam(&self, tracked: &[DetectedVehicle]) -> bool {
        tracked.iter().any(|v| match v.kind {
            VehicleKind::Oncoming => true,
            VehicleKind::Ahead => v.distance < self.config.safe_distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Velocity};

    fn engine() -> BeamDecisionEngine {
        BeamDecisionEngine::new(Arc::new(Config::default()))
    }

    fn vehicle(kind: VehicleKind, distance: f64) -> DetectedVehicle {
        DetectedVehicle::new(
            1,
            kind,
            Position::new(0.0, distance),
            Velocity::default(),
            distance,
        )
    }

    #[test]
    fn test_empty_road_high_beam() {
        assert_eq!(engine().determine(&[], OvertakingStatus::None), BeamMode::HighBeam);
    }

    #[test]
    fn test_oncoming_at_any_distance_low_beam() {
        let v = vehicle(VehicleKind::Oncoming, 190.0);
        assert_eq!(engine().determine(&[v], OvertakingStatus::None), BeamMode::LowBeam);
    }

    #[test]
    fn test_vehicle_ahead_safe_distance_boundary() {
        let e = engine();
        let close = vehicle(VehicleKind::Ahead, 49.9);
        let at_limit = vehicle(VehicleKind::Ahead, 50.0);
        assert_eq!(e.determine(&[close], OvertakingStatus::None), BeamMode::LowBeam);
        assert_eq!(e.determine(&[at_limit], OvertakingStatus::None), BeamMode::HighBeam);
    }

    #[test]
    fn test_overtaking_status_does_not_change_decision() {
        let e = engine();
        let far = [vehicle(VehicleKind::Ahead, 80.0)];
        let close = [vehicle(VehicleKind::Ahead, 20.0)];
        for status in [
            OvertakingStatus::None,
            OvertakingStatus::InProgress,
            OvertakingStatus::Complete,
            OvertakingStatus::Aborted,
        ] {
            assert_eq!(e.determine(&far, status), BeamMode::HighBeam);
            assert_eq!(e.determine(&close, status), BeamMode::LowBeam);
        }
    }
}
