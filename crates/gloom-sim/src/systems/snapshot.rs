//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use gloom_core::components::{Bullet, Mob, Player};
use gloom_core::state::*;
use gloom_core::types::{PlayerId, Position, SimTime, Velocity};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, time: &SimTime) -> GameStateSnapshot {
    GameStateSnapshot {
        players: build_players(world),
        mobs: build_mobs(world),
        bullets: build_bullets(world),
        time: *time,
        timestamp: time.elapsed_ms,
    }
}

fn build_players(world: &World) -> BTreeMap<PlayerId, PlayerView> {
    world
        .query::<(&Player, &Position, &Velocity)>()
        .iter()
        .map(|(_, (player, pos, vel))| {
            (
                player.id,
                PlayerView {
                    id: player.id,
                    position: *pos,
                    velocity: *vel,
                    aim_angle: player.aim_angle,
                    hp: player.hp,
                    equipped_tier: player.tier,
                },
            )
        })
        .collect()
}

/// Mobs ordered by id.
fn build_mobs(world: &World) -> Vec<MobView> {
    let mut mobs: Vec<MobView> = world
        .query::<(&Mob, &Position, &Velocity)>()
        .iter()
        .map(|(_, (mob, pos, vel))| MobView {
            id: mob.id,
            position: *pos,
            velocity: *vel,
            hp: mob.hp,
            alive: mob.alive,
        })
        .collect();
    mobs.sort_by_key(|m| m.id);
    mobs
}

/// Bullets ordered by id.
fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Position, &Velocity)>()
        .iter()
        .map(|(_, (bullet, pos, vel))| BulletView {
            id: bullet.id,
            position: *pos,
            velocity: *vel,
            owner_id: bullet.owner,
        })
        .collect();
    bullets.sort_by_key(|b| b.id);
    bullets
}
