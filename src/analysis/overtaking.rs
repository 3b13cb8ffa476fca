// src/analysis/overtaking.rs
//
// Overtaking lifecycle against a single target vehicle.
//
//   None ──(ego > 1.5 m off lane center, Ahead vehicle in front)──► InProgress
//   InProgress ──(target passed + back in lane)──► Complete
//   InProgress ──(back in lane, target not passed)──► Aborted
//   InProgress ──(target id lost from tracked set)──► Aborted
//   Complete | Aborted ──(back in lane)──► None
//
// The target id lives inside the InProgress variant, so it cannot
// outlive the episode.

use crate::types::{DetectedVehicle, OvertakingStatus, Position, VehicleKind};
use tracing::{debug, info, warn};

/// Lateral excursion from lane center that starts an overtake (meters)
const LANE_CHANGE_THRESHOLD_M: f64 = 1.5;
/// Lateral offset under which ego counts as back in its lane (meters)
const RETURN_TO_LANE_THRESHOLD_M: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum OvertakePhase {
    Idle,
    InProgress { target_id: u32 },
    Complete,
    Aborted,
}

pub struct OvertakingStateMachine {
    phase: OvertakePhase,
    lane_center: f64,
}

impl Default for OvertakingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl OvertakingStateMachine {
    pub fn new() -> Self {
        Self::with_lane_center(0.0)
    }

    /// Lane center fixed at the lateral position observed at construction.
    pub fn with_lane_center(lane_center: f64) -> Self {
        Self {
            phase: OvertakePhase::Idle,
            lane_center,
        }
    }

    pub fn update(&mut self, ego_position: Position, tracked: &[DetectedVehicle]) {
        let offset = (ego_position.x - self.lane_center).abs();

        match self.phase {
            OvertakePhase::Idle => {
                if offset <= LANE_CHANGE_THRESHOLD_M {
                    return;
                }
                if let Some(target) = closest_vehicle_ahead(tracked) {
                    info!(
                        "🟡 Overtake started: target #{} at {:.1}m (lateral offset {:.2}m)",
                        target.id, target.distance, offset
                    );
                    self.phase = OvertakePhase::InProgress {
                        target_id: target.id,
                    };
                }
            }

            OvertakePhase::InProgress { target_id } => {
                let Some(target) = tracked.iter().find(|v| v.id == target_id) else {
                    warn!("⚠️  Overtake target #{} lost, aborting", target_id);
                    self.phase = OvertakePhase::Aborted;
                    return;
                };

                let passed = target.position.y < 0.0;
                let returned = offset < RETURN_TO_LANE_THRESHOLD_M;

                match (passed, returned) {
                    (true, true) => {
                        info!("✅ Overtake complete: passed target #{}", target_id);
                        self.phase = OvertakePhase::Complete;
                    }
                    (false, true) => {
                        info!(
                            "↩️  Overtake aborted: returned to lane behind target #{}",
                            target_id
                        );
                        self.phase = OvertakePhase::Aborted;
                    }
                    _ => debug!(
                        "Overtake in progress: target #{} rel_y={:.1} offset={:.2}",
                        target_id, target.position.y, offset
                    ),
                }
            }

            OvertakePhase::Complete | OvertakePhase::Aborted => {
                if offset < RETURN_TO_LANE_THRESHOLD_M {
                    debug!("Overtake state reset (back in lane)");
                    self.phase = OvertakePhase::Idle;
                }
            }
        }
    }

    pub fn status(&self) -> OvertakingStatus {
        match self.phase {
            OvertakePhase::Idle => OvertakingStatus::None,
            OvertakePhase::InProgress { .. } => OvertakingStatus::InProgress,
            OvertakePhase::Complete => OvertakingStatus::Complete,
            OvertakePhase::Aborted => OvertakingStatus::Aborted,
        }
    }

    pub fn target_id(&self) -> Option<u32> {
        match self.phase {
            OvertakePhase::InProgress { target_id } => Some(target_id),
            _ => None,
        }
    }
}

/// Nearest Ahead vehicle that is actually in front (relative y > 0).
/// Ties keep the earlier vehicle in tracker order.
fn closest_vehicle_ahead(tracked: &[DetectedVehicle]) -> Option<&DetectedVehicle> {
    tracked
        .iter()
        .filter(|v| v.kind == VehicleKind::Ahead && v.position.y > 0.0)
        .fold(None, |best: Option<&DetectedVehicle>, v| match best {
            Some(b) if b.distance <= v.distance => Some(b),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Velocity;

    fn vehicle(id: u32, kind: VehicleKind, x: f64, y: f64) -> DetectedVehicle {
        let position = Position::new(x, y);
        DetectedVehicle::new(id, kind, position, Velocity::default(), position.norm())
    }

    fn ego(x: f64) -> Position {
        Position::new(x, 0.0)
    }

    fn start_overtake(sm: &mut OvertakingStateMachine, target: DetectedVehicle) {
        sm.update(ego(0.0), &[target]);
        assert_eq!(sm.status(), OvertakingStatus::None);
        sm.update(ego(2.0), &[target]);
        assert_eq!(sm.status(), OvertakingStatus::InProgress);
    }

    #[test]
    fn test_lane_change_behind_vehicle_starts_overtake() {
        let mut sm = OvertakingStateMachine::new();
        let target = vehicle(1, VehicleKind::Ahead, 0.0, 50.0);
        start_overtake(&mut sm, target);
        assert_eq!(sm.target_id(), Some(1));
    }

    #[test]
    fn test_no_start_without_vehicle_ahead() {
        let mut sm = OvertakingStateMachine::new();
        let oncoming = vehicle(1, VehicleKind::Oncoming, -2.0, 50.0);
        let behind = vehicle(2, VehicleKind::Ahead, 0.0, -10.0);
        sm.update(ego(2.0), &[oncoming, behind]);
        assert_eq!(sm.status(), OvertakingStatus::None);
        assert_eq!(sm.target_id(), None);
    }

    #[test]
    fn test_excursion_threshold_is_exclusive() {
        let mut sm = OvertakingStateMachine::new();
        sm.update(ego(1.5), &[vehicle(1, VehicleKind::Ahead, 0.0, 50.0)]);
        assert_eq!(sm.status(), OvertakingStatus::None);
    }

    #[test]
    fn test_targets_closest_vehicle_ahead() {
        let mut sm = OvertakingStateMachine::new();
        let far = vehicle(1, VehicleKind::Ahead, 0.0, 90.0);
        let near = vehicle(5, VehicleKind::Ahead, 0.0, 30.0);
        sm.update(ego(2.0), &[far, near]);
        assert_eq!(sm.target_id(), Some(5));
    }

    #[test]
    fn test_pass_and_return_completes() {
        let mut sm = OvertakingStateMachine::new();
        start_overtake(&mut sm, vehicle(1, VehicleKind::Ahead, 0.0, 50.0));

        // passed but still in the overtaking lane
        let passed = vehicle(1, VehicleKind::Ahead, -2.0, -10.0);
        sm.update(ego(2.0), &[passed]);
        assert_eq!(sm.status(), OvertakingStatus::InProgress);

        sm.update(ego(0.2), &[passed]);
        assert_eq!(sm.status(), OvertakingStatus::Complete);
        assert_eq!(sm.target_id(), None);
    }

    #[test]
    fn test_return_without_passing_aborts() {
        let mut sm = OvertakingStateMachine::new();
        let target = vehicle(1, VehicleKind::Ahead, 0.0, 50.0);
        start_overtake(&mut sm, target);

        sm.update(ego(0.0), &[target]);
        assert_eq!(sm.status(), OvertakingStatus::Aborted);
        assert_eq!(sm.target_id(), None);
    }

    #[test]
    fn test_lost_target_aborts() {
        let mut sm = OvertakingStateMachine::new();
        start_overtake(&mut sm, vehicle(1, VehicleKind::Ahead, 0.0, 50.0));

        sm.update(ego(2.0), &[vehicle(2, VehicleKind::Ahead, 0.0, 60.0)]);
        assert_eq!(sm.status(), OvertakingStatus::Aborted);
        assert_eq!(sm.target_id(), None);
    }

    #[test]
    fn test_terminal_states_reset_once_back_in_lane() {
        let mut sm = OvertakingStateMachine::new();
        start_overtake(&mut sm, vehicle(1, VehicleKind::Ahead, 0.0, 50.0));
        sm.update(ego(2.0), &[]);
        assert_eq!(sm.status(), OvertakingStatus::Aborted);

        // still out of lane: stays Aborted
        sm.update(ego(2.0), &[]);
        assert_eq!(sm.status(), OvertakingStatus::Aborted);

        sm.update(ego(0.1), &[]);
        assert_eq!(sm.status(), OvertakingStatus::None);
    }

    #[test]
    fn test_lane_center_offset() {
        let mut sm = OvertakingStateMachine::with_lane_center(3.5);
        let target = vehicle(1, VehicleKind::Ahead, 0.0, 50.0);
        sm.update(ego(3.5), &[target]);
        assert_eq!(sm.status(), OvertakingStatus::None);
        sm.update(ego(1.5), &[target]);
        assert_eq!(sm.status(), OvertakingStatus::InProgress);
    }
}
