// src/pipeline/mod.rs

pub mod orchestrator;
pub mod tick;

pub use orchestrator::ControlOrchestrator;
pub use tick::{ActuatorOutputs, MotionSample, TickInput, TickReport};
