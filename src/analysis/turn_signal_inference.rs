// src/analysis/turn_signal_inference.rs
//
// Turn-signal command from motion signals. Sign convention: positive
// lateral velocity, steering angle and yaw rate mean "left".
//
// Activation is first-match Left before Right, so mixed signals pick
// Left. An active Left/Right is cancelled only once every signal is
// inside its deadzone. Hazard is never cancelled here, but a turn
// replaces it like any other signal.

use crate::types::TurnSignalState;

#[derive(Debug, Clone)]
pub struct TurnSignalThresholds {
    /// Lateral velocity that indicates a lane change (m/s)
    pub lateral_velocity: f64,
    /// Steering angle that indicates a turn (degrees)
    pub steering_angle: f64,
    /// Yaw rate that indicates a turn (deg/s)
    pub yaw_rate: f64,
    /// Cancellation deadzones
    pub lateral_velocity_deadzone: f64,
    pub steering_deadzone: f64,
    pub yaw_deadzone: f64,
}

impl Default for TurnSignalThresholds {
    fn default() -> Self {
        Self {
            lateral_velocity: 0.5,
            steering_angle: 15.0,
            yaw_rate: 5.0,
            lateral_velocity_deadzone: 0.2,
            steering_deadzone: 5.0,
            yaw_deadzone: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSignals {
    pub lateral_velocity: f64,
    pub steering_angle: f64,
    pub yaw_rate: f64,
}

pub struct TurnSignalInference {
    thresholds: TurnSignalThresholds,
}

impl Default for TurnSignalInference {
    fn default() -> Self {
        Self::new(TurnSignalThresholds::default())
    }
}

impl TurnSignalInference {
    pub fn new(thresholds: TurnSignalThresholds) -> Self {
        Self { thresholds }
    }

    /// Next signal given the one currently shown. A turn replaces any
    /// signal, Hazard included; only Left/Right auto-cancel.
    pub fn infer(&self, current: TurnSignalState, signals: MotionSignals) -> TurnSignalState {
        let t = &self.thresholds;
        let turning_left = signals.lateral_velocity > t.lateral_velocity
            || signals.steering_angle > t.steering_angle
            || signals.yaw_rate > t.yaw_rate;
        let turning_right = signals.lateral_velocity < -t.lateral_velocity
            || signals.steering_angle < -t.steering_angle
            || signals.yaw_rate < -t.yaw_rate;

        if turning_left {
            return TurnSignalState::Left;
        }
        if turning_right {
            return TurnSignalState::Right;
        }

        let straight = signals.lateral_velocity.abs() < t.lateral_velocity_deadzone
            && signals.steering_angle.abs() < t.steering_deadzone
            && signals.yaw_rate.abs() < t.yaw_deadzone;

        match current {
            TurnSignalState::Left | TurnSignalState::Right if straight => TurnSignalState::Off,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(lateral_velocity: f64, steering_angle: f64, yaw_rate: f64) -> MotionSignals {
        MotionSignals {
            lateral_velocity,
            steering_angle,
            yaw_rate,
        }
    }

    #[test]
    fn test_each_signal_activates() {
        let inf = TurnSignalInference::default();
        let off = TurnSignalState::Off;
        assert_eq!(inf.infer(off, signals(20.0, 0.0, 0.0)), TurnSignalState::Left);
        assert_eq!(inf.infer(off, signals(0.0, 16.0, 0.0)), TurnSignalState::Left);
        assert_eq!(inf.infer(off, signals(0.0, 0.0, 6.0)), TurnSignalState::Left);
        assert_eq!(inf.infer(off, signals(-0.6, 0.0, 0.0)), TurnSignalState::Right);
        assert_eq!(inf.infer(off, signals(0.0, -16.0, 0.0)), TurnSignalState::Right);
        assert_eq!(inf.infer(off, signals(0.0, 0.0, -6.0)), TurnSignalState::Right);
    }

    #[test]
    fn test_mixed_signals_prefer_left() {
        let inf = TurnSignalInference::default();
        let s = signals(-1.0, 20.0, 0.0);
        assert_eq!(inf.infer(TurnSignalState::Off, s), TurnSignalState::Left);
    }

    #[test]
    fn test_cancel_only_inside_deadzones() {
        let inf = TurnSignalInference::default();
        assert_eq!(
            inf.infer(TurnSignalState::Left, signals(0.0, 0.0, 0.0)),
            TurnSignalState::Off
        );
        // between deadzone and activation threshold: hold
        assert_eq!(
            inf.infer(TurnSignalState::Right, signals(0.3, 0.0, 0.0)),
            TurnSignalState::Right
        );
        assert_eq!(
            inf.infer(TurnSignalState::Left, signals(0.0, 10.0, 0.0)),
            TurnSignalState::Left
        );
    }

    #[test]
    fn test_hazard_not_cancelled_when_straight() {
        let inf = TurnSignalInference::default();
        let h = TurnSignalState::Hazard;
        assert_eq!(inf.infer(h, signals(0.0, 0.0, 0.0)), h);
        // between deadzone and threshold: hold
        assert_eq!(inf.infer(h, signals(0.3, 10.0, 3.0)), h);
    }

    #[test]
    fn test_turn_replaces_hazard() {
        let inf = TurnSignalInference::default();
        let h = TurnSignalState::Hazard;
        assert_eq!(inf.infer(h, signals(0.0, 30.0, 0.0)), TurnSignalState::Left);
        assert_eq!(inf.infer(h, signals(0.0, 0.0, -6.0)), TurnSignalState::Right);
    }

    #[test]
    fn test_off_stays_off_when_straight() {
        let inf = TurnSignalInference::default();
        assert_eq!(
            inf.infer(TurnSignalState::Off, signals(0.1, 1.0, 0.5)),
            TurnSignalState::Off
        );
    }
}
