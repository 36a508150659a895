//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Equipped flashlight tier. Presentation-only on the server; carried in
/// the snapshot so clients can render the right light cone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentTier {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Mob behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobState {
    /// Moving in a random direction that changes on a timer or on wall contact.
    #[default]
    Wandering,
    /// Pursuing and attacking a specific player.
    Aggroed,
}
