//! Events emitted by the simulation and the server → client message set.

use serde::{Deserialize, Serialize};

use crate::state::{GameStateSnapshot, WorldLayout};
use crate::types::{MobId, PlayerId, Position};

/// One-shot occurrences raised during a tick, drained once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player fired; `position` is the muzzle.
    ShotFired {
        player: PlayerId,
        position: Position,
        angle: f64,
    },
    /// A bullet hit a mob that survived.
    MobHit { mob: MobId, position: Position },
    /// A bullet killed a mob.
    MobDied { mob: MobId, position: Position },
    /// A mob landed an attack on its target.
    MobAttacked { mob: MobId, position: Position },
}

/// Server → client messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// Full per-tick snapshot, broadcast to everyone.
    GameState(GameStateSnapshot),
    /// Static layout, sent on connect and on request.
    WorldData(WorldLayout),
    PlayerJoined(PlayerId),
    PlayerLeft(PlayerId),
    PlayerShoot {
        player_id: PlayerId,
        x: f64,
        y: f64,
        angle: f64,
    },
    MobHit { mob_id: MobId, x: f64, y: f64 },
    MobDeath { mob_id: MobId, x: f64, y: f64 },
    MobAttack { mob_id: MobId, x: f64, y: f64 },
}

impl From<GameEvent> for ServerMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::ShotFired {
                player,
                position,
                angle,
            } => ServerMessage::PlayerShoot {
                player_id: player,
                x: position.x,
                y: position.y,
                angle,
            },
            GameEvent::MobHit { mob, position } => ServerMessage::MobHit {
                mob_id: mob,
                x: position.x,
                y: position.y,
            },
            GameEvent::MobDied { mob, position } => ServerMessage::MobDeath {
                mob_id: mob,
                x: position.x,
                y: position.y,
            },
            GameEvent::MobAttacked { mob, position } => ServerMessage::MobAttack {
                mob_id: mob,
                x: position.x,
                y: position.y,
            },
        }
    }
}
