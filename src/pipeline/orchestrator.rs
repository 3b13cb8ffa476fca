// src/pipeline/orchestrator.rs
//
// Control orchestrator. Owns all mutable state and sequences the
// components once per tick:
//
//   1. lateral velocity from the previous ego position
//   2. ManualOverride → observe only (tracker + overtaking), no actuation
//   3. stall (rpm < 300 while moving > 1 m/s) → hazard lights + low beam
//   4. tracker ingest
//   5. hazard scan → high beam + horn, skips 6–9
//   6. overtaking update + beam decision             (not when stalled)
//   7. overtaking blink / oncoming pause / horn sync  (not when stalled)
//   8. apply target beam unless blinking              (not when stalled)
//   9. turn-signal inference                          (not when stalled)
//  10. any fault in the guarded path → Error + safe posture
//  11. advance actuators by dt (always, outside ManualOverride)
//
// Faults are returned as ControlFault values from the guarded path; this
// is the only place that turns one into SystemState::Error. There is no
// automatic exit from Error; `set_manual_override` is the way out.

use super::tick::{ActuatorOutputs, MotionSample, TickInput, TickReport};
use crate::actuators::{BeamActuator, HornActuator, TurnSignalActuator};
use crate::analysis::{
    BeamDecisionEngine, HazardScanner, MotionSignals, OvertakingStateMachine,
    TurnSignalInference, VehicleTracker,
};
use crate::config::Config;
use crate::diagnostics::{
    ErrorSink, HAZARD_ADVISORY, MANUAL_MODE_FAULT, STALL_ADVISORY, SYSTEM_FAILURE,
};
use crate::error::{ControlFault, ControlResult};
use crate::sensor::DetectionSource;
use crate::types::{
    BeamMode, DetectedVehicle, HazardReport, OvertakingStatus, Position, SystemState,
    TurnSignalState, VehicleKind,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Engine speed below which a moving vehicle is considered stalled
const STALL_RPM: f64 = 300.0;
/// Ground speed above which the vehicle counts as moving (m/s)
const STALL_MIN_SPEED_MPS: f64 = 1.0;
/// Horn blast on an imminent-collision hazard (seconds)
const HAZARD_HORN_S: f64 = 0.5;

pub struct ControlOrchestrator {
    config: Arc<Config>,
    state: SystemState,
    tracker: VehicleTracker,
    overtaking: OvertakingStateMachine,
    beam_decision: BeamDecisionEngine,
    turn_inference: TurnSignalInference,
    beam: BeamActuator,
    horn: HornActuator,
    turn_signal: TurnSignalActuator,
    diagnostics: ErrorSink,
    prev_ego_position: Option<Position>,
    /// Last blink cycle that fired a horn pulse
    last_synced_cycle: i64,
}

impl ControlOrchestrator {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_lane_center(config, 0.0)
    }

    pub fn with_lane_center(config: Arc<Config>, lane_center: f64) -> Self {
        Self {
            tracker: VehicleTracker::new(Arc::clone(&config)),
            overtaking: OvertakingStateMachine::with_lane_center(lane_center),
            beam_decision: BeamDecisionEngine::new(Arc::clone(&config)),
            turn_inference: TurnSignalInference::default(),
            beam: BeamActuator::new(Arc::clone(&config)),
            horn: HornActuator::new(),
            turn_signal: TurnSignalActuator::new(),
            diagnostics: ErrorSink::new(),
            state: SystemState::Normal,
            prev_ego_position: None,
            last_synced_cycle: -1,
            config,
        }
    }

    /// Run one tick with detections supplied in memory.
    pub fn tick(&mut self, input: &TickInput<'_>) -> TickReport {
        let detections = input.detections;
        self.process(input.dt, input.ego_position, input.motion, || {
            Ok(detections.to_vec())
        })
    }

    /// Run one tick, reading detections from `source` inside the guarded path.
    pub fn tick_with_source<S>(
        &mut self,
        source: &mut S,
        dt: f64,
        ego_position: Position,
        motion: MotionSample,
    ) -> TickReport
    where
        S: DetectionSource + ?Sized,
    {
        self.process(dt, ego_position, motion, || {
            source.read_detections().map_err(ControlFault::from)
        })
    }

    /// Enabling silences the actuators and stops all actuation until
    /// disabled. Disabling returns to Normal, including from Error.
    pub fn set_manual_override(&mut self, enabled: bool) {
        if enabled {
            info!("🖐  Manual override engaged");
            self.state = SystemState::ManualOverride;
            self.beam.stop_blinking();
            self.horn.stop();
            self.turn_signal.activate(TurnSignalState::Off);
        } else {
            info!("Manual override released");
            self.state = SystemState::Normal;
        }
    }

    fn process<F>(
        &mut self,
        dt: f64,
        ego_position: Position,
        motion: MotionSample,
        acquire: F,
    ) -> TickReport
    where
        F: FnOnce() -> ControlResult<Vec<DetectedVehicle>>,
    {
        let lateral_velocity = self.lateral_velocity(ego_position, dt);

        let mut report = TickReport {
            system_state: self.state,
            lateral_velocity,
            stalled: false,
            hazard: HazardReport::none(),
            overtaking_status: self.overtaking.status(),
            target_beam: None,
            fault: None,
            outputs: self.outputs(),
        };

        if self.state == SystemState::ManualOverride {
            if let Err(fault) = self.observe(ego_position, acquire) {
                self.diagnostics
                    .log(format!("Error in manual tracking: {}", fault), MANUAL_MODE_FAULT);
                report.fault = Some(fault);
            }
            report.overtaking_status = self.overtaking.status();
            return report;
        }

        let outcome = self.control(
            dt,
            ego_position,
            motion,
            lateral_velocity,
            acquire,
            &mut report,
        );
        if let Err(fault) = outcome {
            self.enter_error(&fault);
            report.fault = Some(fault);
        }

        self.beam.advance(dt);
        self.horn.advance(dt);
        self.turn_signal.advance(dt);

        report.system_state = self.state;
        report.overtaking_status = self.overtaking.status();
        report.outputs = self.outputs();
        report
    }

    /// Lateral velocity from the previous finite ego position, 0 on the
    /// first tick or when dt is not positive.
    fn lateral_velocity(&mut self, ego_position: Position, dt: f64) -> f64 {
        let velocity = match self.prev_ego_position {
            Some(prev) if dt > 0.0 => (ego_position.x - prev.x) / dt,
            _ => 0.0,
        };
        if ego_position.is_finite() {
            self.prev_ego_position = Some(ego_position);
        }
        velocity
    }

    /// ManualOverride path: keep tracking and overtaking state current
    /// without touching any actuator.
    fn observe<F>(&mut self, ego_position: Position, acquire: F) -> ControlResult<()>
    where
        F: FnOnce() -> ControlResult<Vec<DetectedVehicle>>,
    {
        check_finite("ego_position.x", ego_position.x)?;
        check_finite("ego_position.y", ego_position.y)?;
        let detections = acquire()?;
        let tracked = self.tracker.ingest(&detections);
        self.overtaking.update(ego_position, &tracked);
        Ok(())
    }

    fn control<F>(
        &mut self,
        dt: f64,
        ego_position: Position,
        motion: MotionSample,
        lateral_velocity: f64,
        acquire: F,
        report: &mut TickReport,
    ) -> ControlResult<()>
    where
        F: FnOnce() -> ControlResult<Vec<DetectedVehicle>>,
    {
        validate_inputs(dt, ego_position, &motion)?;

        if self.state == SystemState::Error {
            self.beam.switch_mode(BeamMode::LowBeam);
        }

        let stalled = motion.engine_rpm < STALL_RPM
            && motion.ego_velocity.speed() > STALL_MIN_SPEED_MPS;
        report.stalled = stalled;
        if stalled {
            self.turn_signal.activate(TurnSignalState::Hazard);
            self.diagnostics.log(
                format!(
                    "ENGINE STALL DETECTED at {:.0} rpm, {:.1} m/s! Hazards activated.",
                    motion.engine_rpm,
                    motion.ego_velocity.speed()
                ),
                STALL_ADVISORY,
            );
            self.beam.switch_mode(BeamMode::LowBeam);
        }

        let detections = acquire()?;
        let tracked = self.tracker.ingest(&detections);

        let hazard = HazardScanner::scan(&tracked, motion.ego_velocity);
        if hazard.is_hazard() {
            self.diagnostics
                .log(format!("HAZARD: {}", hazard.message), HAZARD_ADVISORY);
            self.beam.switch_mode(BeamMode::HighBeam);
            self.horn.trigger(HAZARD_HORN_S);
            report.hazard = hazard;
            return Ok(());
        }

        if stalled {
            return Ok(());
        }

        self.overtaking.update(ego_position, &tracked);
        let status = self.overtaking.status();
        let target_mode = self.beam_decision.determine(&tracked, status);
        report.target_beam = Some(target_mode);

        self.coordinate_overtaking(status, &tracked);

        if !self.beam.is_blinking() {
            self.beam.switch_mode(target_mode);
        }

        let next_signal = self.turn_inference.infer(
            self.turn_signal.state(),
            MotionSignals {
                lateral_velocity,
                steering_angle: motion.steering_angle,
                yaw_rate: motion.yaw_rate,
            },
        );
        self.turn_signal.activate(next_signal);

        debug!(
            "Tick: {} tracked, overtaking={}, target={:?}, blinking={}",
            tracked.len(),
            status.as_str(),
            target_mode,
            self.beam.is_blinking()
        );
        Ok(())
    }

    /// Blink the high beam while overtaking a visible target, pause for
    /// oncoming traffic, and pulse the horn once per blink cycle.
    fn coordinate_overtaking(&mut self, status: OvertakingStatus, tracked: &[DetectedVehicle]) {
        if status != OvertakingStatus::InProgress {
            if self.beam.is_blinking() {
                self.beam.stop_blinking();
            }
            return;
        }

        if tracked.iter().any(|v| v.kind == VehicleKind::Oncoming) {
            if self.beam.is_blinking() {
                info!("⏸  Oncoming traffic: overtaking blink paused");
            }
            self.beam.stop_blinking();
            self.beam.switch_mode(BeamMode::LowBeam);
            return;
        }

        let target_visible = self
            .overtaking
            .target_id()
            .and_then(|id| self.tracker.get(id))
            .is_some();

        if target_visible && !self.beam.is_blinking() {
            self.beam.start_blinking();
            // next cycle boundary (including the current one) fires the horn
            self.last_synced_cycle = self.blink_cycle() - 1;
        }

        if self.beam.is_blinking() {
            self.sync_horn();
        }
    }

    fn blink_cycle(&self) -> i64 {
        (self.beam.blink_timer() / self.config.blink_period()).floor() as i64
    }

    fn sync_horn(&mut self) {
        let cycle = self.blink_cycle();
        if cycle > self.last_synced_cycle {
            self.horn.trigger(self.config.horn_sync_pulse());
            self.last_synced_cycle = cycle;
        }
    }

    fn enter_error(&mut self, fault: &ControlFault) {
        self.diagnostics
            .log(format!("System failure: {}", fault), SYSTEM_FAILURE);
        self.state = SystemState::Error;
        self.beam.switch_mode(BeamMode::LowBeam);
        self.beam.stop_blinking();
        self.horn.stop();
        self.turn_signal.activate(TurnSignalState::Off);
    }

    pub fn outputs(&self) -> ActuatorOutputs {
        ActuatorOutputs {
            beam_mode: self.beam.mode(),
            physical_beam: self.beam.physical_beam(),
            blinking: self.beam.is_blinking(),
            horn_active: self.horn.is_active(),
            turn_signal: self.turn_signal.state(),
            turn_signal_lit: self.turn_signal.is_lit(),
        }
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn diagnostics(&self) -> &ErrorSink {
        &self.diagnostics
    }

    pub fn beam(&self) -> &BeamActuator {
        &self.beam
    }

    pub fn horn(&self) -> &HornActuator {
        &self.horn
    }

    pub fn turn_signal(&self) -> &TurnSignalActuator {
        &self.turn_signal
    }

    pub fn overtaking(&self) -> &OvertakingStateMachine {
        &self.overtaking
    }

    pub fn tracker(&self) -> &VehicleTracker {
        &self.tracker
    }
}

fn check_finite(field: &'static str, value: f64) -> ControlResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ControlFault::NonFiniteInput { field, value })
    }
}

fn validate_inputs(dt: f64, ego_position: Position, motion: &MotionSample) -> ControlResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(ControlFault::InvalidTimeStep(dt));
    }
    check_finite("ego_position.x", ego_position.x)?;
    check_finite("ego_position.y", ego_position.y)?;
    check_finite("steering_angle", motion.steering_angle)?;
    check_finite("yaw_rate", motion.yaw_rate)?;
    check_finite("ego_velocity.vx", motion.ego_velocity.vx)?;
    check_finite("ego_velocity.vy", motion.ego_velocity.vy)?;
    check_finite("engine_rpm", motion.engine_rpm)
}
