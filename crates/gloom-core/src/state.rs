//! Network-facing state: the per-tick snapshot and the static layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::EquipmentTier;
use crate::types::{BulletId, Lamp, MobId, PlayerId, Position, Rect, SimTime, Velocity};

/// Complete world state broadcast to every client after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub players: BTreeMap<PlayerId, PlayerView>,
    pub mobs: Vec<MobView>,
    pub bullets: Vec<BulletView>,
    pub time: SimTime,
    /// Sim-clock milliseconds at the end of the tick.
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Position,
    pub velocity: Velocity,
    pub aim_angle: f64,
    pub hp: i32,
    pub equipped_tier: EquipmentTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobView {
    pub id: MobId,
    pub position: Position,
    pub velocity: Velocity,
    pub hp: i32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletView {
    pub id: BulletId,
    pub position: Position,
    pub velocity: Velocity,
    pub owner_id: PlayerId,
}

/// Immutable static geometry generated once per server lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub walls: Vec<Rect>,
    pub lamps: Vec<Lamp>,
}
