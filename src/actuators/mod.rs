// src/actuators/mod.rs
//
// Physical-output models. Each owns its own state and timers and is
// advanced by the caller-supplied dt; outputs never read external input
// directly.

pub mod beam;
pub mod horn;
pub mod turn_signal;

pub use beam::BeamActuator;
pub use horn::HornActuator;
pub use turn_signal::TurnSignalActuator;
