// src/analysis/hazard_scanner.rs
//
// Stateless imminent-collision scan over the tracked set.
//
// Returns on the FIRST vehicle (tracker order) that matches a predicate,
// not the closest or most severe one.
//
//   Oncoming, in lane: hazard when approaching (relative y and own vy
//                      have opposing signs)
//   Ahead, in lane:    hazard when distance < 30 m and closing > 5 m/s,
//                      or distance < 10 m regardless of speed

use crate::types::{DetectedVehicle, HazardReport, VehicleKind, Velocity};

const CLOSING_DISTANCE_M: f64 = 30.0;
const CLOSING_SPEED_MPS: f64 = 5.0;
const CRITICAL_DISTANCE_M: f64 = 10.0;

pub struct HazardScanner;

impl HazardScanner {
    pub fn scan(tracked: &[DetectedVehicle], ego_velocity: Velocity) -> HazardReport {
        for vehicle in tracked.iter().filter(|v| v.is_in_ego_lane()) {
            match vehicle.kind {
                VehicleKind::Oncoming => {
                    if is_approaching(vehicle) {
                        return HazardReport::blocking(vehicle.id, "Oncoming vehicle in lane!");
                    }
                }
                VehicleKind::Ahead => {
                    let closing_speed = ego_velocity.vy - vehicle.velocity.vy;
                    if vehicle.distance < CLOSING_DISTANCE_M && closing_speed > CLOSING_SPEED_MPS {
                        return HazardReport::blocking(
                            vehicle.id,
                            format!(
                                "Rapidly approaching vehicle ahead! Closing speed: {:.1} m/s",
                                closing_speed
                            ),
                        );
                    }
                    if vehicle.distance < CRITICAL_DISTANCE_M {
                        return HazardReport::blocking(vehicle.id, "Vehicle ahead critically close!");
                    }
                }
            }
        }
        HazardReport::none()
    }
}

fn is_approaching(vehicle: &DetectedVehicle) -> bool {
    let y = vehicle.position.y;
    let vy = vehicle.velocity.vy;
    (y > 0.0 && vy < 0.0) || (y < 0.0 && vy > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HazardType, Position};

    fn vehicle(id: u32, kind: VehicleKind, x: f64, y: f64, vy: f64) -> DetectedVehicle {
        let position = Position::new(x, y);
        DetectedVehicle::new(id, kind, position, Velocity::new(0.0, vy), position.norm())
    }

    #[test]
    fn test_empty_set_has_no_hazard() {
        let report = HazardScanner::scan(&[], Velocity::new(0.0, 20.0));
        assert_eq!(report, HazardReport::none());
        assert_eq!(report.message, "");
    }

    #[test]
    fn test_oncoming_in_lane_approaching() {
        let v = vehicle(3, VehicleKind::Oncoming, 0.5, 80.0, -15.0);
        let report = HazardScanner::scan(&[v], Velocity::new(0.0, 20.0));
        assert_eq!(report.hazard, HazardType::BlockingVehicle);
        assert_eq!(report.vehicle_id, Some(3));
    }

    #[test]
    fn test_oncoming_receding_or_out_of_lane_is_safe() {
        let receding = vehicle(1, VehicleKind::Oncoming, 0.0, 80.0, 10.0);
        let other_lane = vehicle(2, VehicleKind::Oncoming, -3.5, 80.0, -15.0);
        let report = HazardScanner::scan(&[receding, other_lane], Velocity::new(0.0, 20.0));
        assert!(!report.is_hazard());
    }

    #[test]
    fn test_oncoming_behind_moving_forward_is_approaching() {
        let v = vehicle(1, VehicleKind::Oncoming, 0.0, -20.0, 5.0);
        assert!(HazardScanner::scan(&[v], Velocity::default()).is_hazard());
    }

    #[test]
    fn test_ahead_closing_fast_within_30m() {
        let v = vehicle(1, VehicleKind::Ahead, 0.0, 25.0, 10.0);
        let report = HazardScanner::scan(&[v], Velocity::new(0.0, 20.0));
        assert!(report.is_hazard());
        assert!(report.message.contains("10.0 m/s"));

        // same gap, slow closure
        let report = HazardScanner::scan(&[v], Velocity::new(0.0, 14.0));
        assert!(!report.is_hazard());
    }

    #[test]
    fn test_ahead_under_10m_always_hazard() {
        let v = vehicle(1, VehicleKind::Ahead, 0.0, 8.0, 30.0);
        let report = HazardScanner::scan(&[v], Velocity::new(0.0, 0.0));
        assert!(report.is_hazard());
        assert_eq!(report.message, "Vehicle ahead critically close!");
    }

    #[test]
    fn test_first_match_not_closest() {
        // id 1 matches (closing fast at 25 m), id 2 is closer and also matches
        let first = vehicle(1, VehicleKind::Ahead, 0.0, 25.0, 0.0);
        let closer = vehicle(2, VehicleKind::Ahead, 0.0, 5.0, 0.0);
        let report = HazardScanner::scan(&[first, closer], Velocity::new(0.0, 20.0));
        assert_eq!(report.vehicle_id, Some(1));
    }
}
