// src/actuators/horn.rs

use tracing::debug;

/// Horn with a self-expiring pulse.
#[derive(Debug, Default)]
pub struct HornActuator {
    active: bool,
    timer: f64,
    duration: f64,
}

impl HornActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sound for `duration` seconds. Retriggering restarts the pulse.
    pub fn trigger(&mut self, duration: f64) {
        debug!("📯 Horn pulse {:.2}s", duration);
        self.active = true;
        self.timer = 0.0;
        self.duration = duration;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.timer = 0.0;
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.timer += dt;
        if self.timer >= self.duration {
            self.active = false;
            self.timer = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
