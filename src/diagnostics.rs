// src/diagnostics.rs
//
// Passive diagnostics sink: append-only ordered log plus a sticky
// "active error" flag. Every entry is mirrored into tracing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

/// Hazard detected ahead or oncoming (advisory)
pub const HAZARD_ADVISORY: u16 = 10;
/// Ego engine stalled while moving (advisory)
pub const STALL_ADVISORY: u16 = 50;
/// Fault while observing in manual override
pub const MANUAL_MODE_FAULT: u16 = 100;
/// Unhandled fault on the normal control path
pub const SYSTEM_FAILURE: u16 = 500;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub code: u16,
}

#[derive(Debug, Default)]
pub struct ErrorSink {
    entries: Vec<LogEntry>,
    active_error: bool,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Any entry raises the active-error flag.
    pub fn log(&mut self, message: impl Into<String>, code: u16) {
        let message = message.into();
        if code >= SYSTEM_FAILURE {
            error!("🛑 [{}] {}", code, message);
        } else {
            warn!("⚠️  [{}] {}", code, message);
        }
        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            message,
            code,
        });
        self.active_error = true;
    }

    pub fn clear_error(&mut self) {
        self.active_error = false;
    }

    pub fn has_active_error(&self) -> bool {
        self.active_error
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}
