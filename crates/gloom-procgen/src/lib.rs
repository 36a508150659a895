//! Procedural world layout for GLOOM.
//!
//! Rejection sampling: every wall, lamp and spawn point is drawn at random
//! and accepted only if it satisfies the placement constraints. Each item
//! has a bounded attempt budget; an item whose budget runs out is skipped,
//! so a crowded world degrades to a smaller layout instead of failing.
//!
//! All functions take the random source as a parameter. Callers decide
//! whether it is seeded.

pub mod layout;
pub mod spawn;

pub use gloom_core as core;
pub use layout::{generate_lamps, generate_layout, generate_walls, GenerationParams};
pub use spawn::random_spawn_point;
