//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over the registry. They do not own state;
//! all state lives in components. Run order is fixed by the engine.

pub mod collision;
pub mod mob_ai;
pub mod players;
pub mod projectiles;
pub mod snapshot;
