//! Commands flowing into the simulation.
//!
//! `ClientMessage` is what a client sends over its channel. The transport
//! layer wraps it into a `SimCommand`, tagging it with the sender's id, and
//! queues it for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// Requested movement direction. Not necessarily normalized on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveDir {
    pub x: f64,
    pub y: f64,
}

/// One snapshot of a client's controls. Latest wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub move_dir: MoveDir,
    pub aim_angle: f64,
    pub is_shooting: bool,
}

/// Client → server messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Replace the sender's pending input.
    PlayerInput(PlayerInput),
    /// Force every living mob to target the sender.
    AggroAll,
    /// Ask for the static layout again.
    RequestWorldData,
}

/// Commands consumed by the simulation engine at a tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// A connection opened; spawn its player.
    Join(PlayerId),
    /// A connection closed; remove its player.
    Leave(PlayerId),
    /// Replace a player's pending input.
    Input { player: PlayerId, input: PlayerInput },
    /// Every living mob targets `player`.
    AggroAll { player: PlayerId },
}

impl PlayerInput {
    /// Clamp the move vector into the unit disk. Non-finite components
    /// count as zero. The aim angle is left untouched.
    pub fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let (x, y) = (finite(self.move_dir.x), finite(self.move_dir.y));
        let len = (x * x + y * y).sqrt();
        let move_dir = if len > 1.0 {
            MoveDir {
                x: x / len,
                y: y / len,
            }
        } else {
            MoveDir { x, y }
        };
        Self { move_dir, ..self }
    }

    pub fn is_moving(&self) -> bool {
        self.move_dir.x != 0.0 || self.move_dir.y != 0.0
    }
}
