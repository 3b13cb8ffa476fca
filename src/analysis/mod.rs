// src/analysis/mod.rs
//
// Per-tick decision components.
//
// Signal flow:
//   Raw detections → vehicle_tracker → tracked set ─┬→ hazard_scanner
//                                                   ├→ overtaking ─┐
//                                                   └──────────────┴→ beam_decision
//   Motion signals → turn_signal_inference
//
// Sequenced and prioritized by pipeline::ControlOrchestrator.

pub mod beam_decision;
pub mod hazard_scanner;
pub mod overtaking;
pub mod turn_signal_inference;
pub mod vehicle_tracker;

pub use beam_decision::BeamDecisionEngine;
pub use hazard_scanner::HazardScanner;
pub use overtaking::OvertakingStateMachine;
pub use turn_signal_inference::{MotionSignals, TurnSignalInference, TurnSignalThresholds};
pub use vehicle_tracker::VehicleTracker;
