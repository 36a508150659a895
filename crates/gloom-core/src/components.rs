//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems and in
//! the mob FSM, not here. `Position` and `Velocity` from `types` are also
//! used directly as components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::commands::PlayerInput;
use crate::enums::{EquipmentTier, MobState};
use crate::types::{BulletId, MobId, PlayerId, Position};

/// A connected player's avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Aim (flashlight) angle in radians, 0 = +x.
    pub aim_angle: f64,
    /// Hit points, 0..=PLAYER_MAX_HP.
    pub hp: i32,
    pub tier: EquipmentTier,
    /// Sim-clock time of the last bullet fired, if any.
    pub last_shot_ms: Option<f64>,
}

/// Latest input received for a player. Overwritten on every arrival.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    pub input: PlayerInput,
}

/// Hostile mob vitals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: MobId,
    pub hp: i32,
    pub alive: bool,
}

/// Current pursuit target of an aggroed mob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggro {
    pub player: PlayerId,
    /// Last known position of the target, refreshed every tick.
    pub position: Position,
}

/// Mob AI memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobBrain {
    /// `None` while wandering.
    pub aggro: Option<Aggro>,
    /// Unit wander (or last pursuit) direction.
    pub direction: DVec2,
    /// Milliseconds since the wander direction last changed.
    pub direction_timer_ms: f64,
    /// Sim-clock time of the last successful attack, if any.
    pub last_attack_ms: Option<f64>,
}

/// Projectile fired by a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: BulletId,
    pub owner: PlayerId,
    /// Sim-clock time at which the bullet was fired.
    pub created_ms: f64,
    /// Position before the latest move. Walls test the whole step from here.
    pub last_position: Position,
}

impl MobBrain {
    pub fn state(&self) -> MobState {
        match self.aggro {
            Some(_) => MobState::Aggroed,
            None => MobState::Wandering,
        }
    }

    pub fn target(&self) -> Option<PlayerId> {
        self.aggro.map(|a| a.player)
    }
}
