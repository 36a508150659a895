//! Simulation engine for GLOOM.
//!
//! Owns the hecs ECS world (through `EntityRegistry`), runs systems once per
//! tick, and produces GameStateSnapshots plus one-shot events for broadcast.

pub mod engine;
pub mod registry;
pub mod systems;

pub use gloom_core as core;
pub use engine::{SimConfig, SimulationEngine, TickOutput};
pub use registry::EntityRegistry;

#[cfg(test)]
mod tests;
