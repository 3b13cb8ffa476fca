// src/actuators/turn_signal.rs
//
// Turn-signal lamp driver: 1 Hz flash, lit for the first half second of
// every cycle. The cycle restarts (lit) whenever the signal changes.

use crate::types::TurnSignalState;
use tracing::info;

const FLASH_PERIOD_S: f64 = 1.0;
const FLASH_ON_S: f64 = 0.5;

#[derive(Debug)]
pub struct TurnSignalActuator {
    signal: TurnSignalState,
    blink_timer: f64,
    lit: bool,
}

impl Default for TurnSignalActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSignalActuator {
    pub fn new() -> Self {
        Self {
            signal: TurnSignalState::Off,
            blink_timer: 0.0,
            lit: false,
        }
    }

    pub fn activate(&mut self, signal: TurnSignalState) {
        if signal == self.signal {
            return;
        }
        info!("🔶 Turn signal {:?} → {:?}", self.signal, signal);
        self.signal = signal;
        self.blink_timer = 0.0;
        self.lit = true;
    }

    pub fn advance(&mut self, dt: f64) {
        if self.signal == TurnSignalState::Off {
            return;
        }
        self.blink_timer = (self.blink_timer + dt).rem_euclid(FLASH_PERIOD_S);
        self.lit = self.blink_timer < FLASH_ON_S;
    }

    pub fn state(&self) -> TurnSignalState {
        self.signal
    }

    /// Bulb physically on. Always false while Off.
    pub fn is_lit(&self) -> bool {
        self.lit && self.signal != TurnSignalState::Off
    }
}
