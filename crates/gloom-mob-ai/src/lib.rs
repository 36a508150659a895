//! Mob AI for GLOOM.
//!
//! Implements the wander / pursue-and-attack state machine as pure
//! functions over plain data, plus the tuning profile it reads.

pub mod fsm;
pub mod profiles;

pub use gloom_core as core;
