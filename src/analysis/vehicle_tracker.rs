// src/analysis/vehicle_tracker.rs
//
// Frame-replacing vehicle tracker.
//
// Each sensor frame is treated as the complete visible set:
//   - invalid detections are dropped silently
//   - distance is recomputed from the relative position
//   - detections beyond detection_range are not tracked
//   - any id absent from the frame is removed (no coasting)
//
// Tracks are kept in a BTreeMap so every consumer iterates in ascending
// id order. The hazard scan is first-match, so this order is part of the
// observable behavior.

use crate::config::Config;
use crate::types::DetectedVehicle;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

pub struct VehicleTracker {
    config: Arc<Config>,
    tracks: BTreeMap<u32, DetectedVehicle>,
}

impl VehicleTracker {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tracks: BTreeMap::new(),
        }
    }

    /// Ingest one frame and return the tracked set in ascending id order.
    pub fn ingest(&mut self, raw: &[DetectedVehicle]) -> Vec<DetectedVehicle> {
        let mut seen = BTreeSet::new();
        let mut dropped_invalid = 0usize;
        let mut out_of_range = 0usize;

        for detection in raw {
            if !detection.is_valid() {
                debug!(
                    "Dropping invalid {} detection #{}",
                    detection.kind.as_str(),
                    detection.id
                );
                dropped_invalid += 1;
                continue;
            }

            let distance = detection.position.norm();
            if distance > self.config.detection_range {
                out_of_range += 1;
                continue;
            }

            let mut vehicle = *detection;
            vehicle.distance = distance;
            self.tracks.insert(vehicle.id, vehicle);
            seen.insert(vehicle.id);
        }

        let before = self.tracks.len();
        self.tracks.retain(|id, _| seen.contains(id));
        let pruned = before - self.tracks.len();

        debug!(
            "Tracker: {} raw, {} invalid, {} out of range, {} pruned → {} tracked",
            raw.len(),
            dropped_invalid,
            out_of_range,
            pruned,
            self.tracks.len()
        );

        self.tracked()
    }

    pub fn tracked(&self) -> Vec<DetectedVehicle> {
        self.tracks.values().copied().collect()
    }

    pub fn get(&self, id: u32) -> Option<&DetectedVehicle> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
