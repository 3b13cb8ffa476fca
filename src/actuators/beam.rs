// src/actuators/beam.rs
//
// Headlight beam actuator. The physical beam is derived from the stored
// mode, the blinking flag and the blink timer only.

use crate::config::Config;
use crate::types::BeamMode;
use std::sync::Arc;
use tracing::debug;

pub struct BeamActuator {
    config: Arc<Config>,
    mode: BeamMode,
    blinking: bool,
    blink_timer: f64,
}

impl BeamActuator {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            mode: BeamMode::LowBeam,
            blinking: false,
            blink_timer: 0.0,
        }
    }

    pub fn switch_mode(&mut self, mode: BeamMode) {
        if mode != self.mode {
            debug!("Beam mode {:?} → {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// No-op while already blinking, so the cycle is not restarted.
    pub fn start_blinking(&mut self) {
        if !self.blinking {
            debug!("💡 Beam blinking started");
            self.blinking = true;
            self.blink_timer = 0.0;
        }
    }

    pub fn stop_blinking(&mut self) {
        if self.blinking {
            debug!("Beam blinking stopped");
        }
        self.blinking = false;
        self.blink_timer = 0.0;
    }

    pub fn advance(&mut self, dt: f64) {
        if self.blinking {
            self.blink_timer += dt;
        }
    }

    /// First half of each blink period is High, second half Low.
    pub fn physical_beam(&self) -> BeamMode {
        if !self.blinking {
            return self.mode;
        }
        let period = self.config.blink_period();
        let phase = self.blink_timer.rem_euclid(period);
        if phase < period / 2.0 {
            BeamMode::HighBeam
        } else {
            BeamMode::LowBeam
        }
    }

    pub fn mode(&self) -> BeamMode {
        self.mode
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    pub fn blink_timer(&self) -> f64 {
        self.blink_timer
    }
}
