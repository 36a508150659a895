//! Player system: applies each player's latest input.
//!
//! Turns the flashlight, moves with tactical speed scaling, and fires when
//! the trigger is held and the weapon is off cooldown.

use glam::DVec2;

use gloom_core::commands::PlayerInput;
use gloom_core::components::{InputState, Player};
use gloom_core::constants::*;
use gloom_core::events::GameEvent;
use gloom_core::types::{PlayerId, Position, Velocity};
use gloom_procgen::GenerationParams;

use crate::registry::EntityRegistry;

/// Run the player system for one tick.
pub fn run(
    registry: &mut EntityRegistry,
    params: &GenerationParams,
    now_ms: f64,
    dt_secs: f64,
    events: &mut Vec<GameEvent>,
) {
    let margin = PLAYER_RADIUS + PLAYER_BOUNDS_MARGIN;
    let mut shots: Vec<(PlayerId, Position, f64)> = Vec::new();

    for (_entity, (player, input_state, pos, vel)) in registry
        .world_mut()
        .query_mut::<(&mut Player, &InputState, &mut Position, &mut Velocity)>()
    {
        let input = input_state.input;
        player.aim_angle = input.aim_angle;

        *vel = movement_velocity(&input);
        if input.is_moving() {
            *pos = pos
                .offset(vel.displacement(dt_secs))
                .clamped(margin, params.width - margin, params.height - margin);
        }

        if input.is_shooting && fire_ready(player.last_shot_ms, now_ms) {
            player.last_shot_ms = Some(now_ms);
            shots.push((player.id, muzzle_position(pos, player.aim_angle), player.aim_angle));
        }
    }

    // Bullet ids follow player order.
    shots.sort_by_key(|(id, _, _)| *id);
    for (player, muzzle, angle) in shots {
        registry.spawn_bullet(player, muzzle, angle, now_ms);
        events.push(GameEvent::ShotFired {
            player,
            position: muzzle,
            angle,
        });
    }
}

/// Velocity for the given input. Speed scales from 100 % moving along the
/// aim direction down to 40 % backing away from it.
pub fn movement_velocity(input: &PlayerInput) -> Velocity {
    let dir = DVec2::new(input.move_dir.x, input.move_dir.y).normalize_or_zero();
    if dir == DVec2::ZERO {
        return Velocity::ZERO;
    }
    let aim = DVec2::new(input.aim_angle.cos(), input.aim_angle.sin());
    let modifier = PLAYER_STRAFE_BASE + PLAYER_STRAFE_SWING * dir.dot(aim);
    Velocity::from(dir * (PLAYER_SPEED * modifier))
}

/// Whether the fire cooldown has elapsed since `last_shot_ms`.
pub fn fire_ready(last_shot_ms: Option<f64>, now_ms: f64) -> bool {
    last_shot_ms.map_or(true, |last| now_ms - last >= FIRE_COOLDOWN_MS)
}

/// Weapon muzzle: forward along the aim and offset to the right hand side.
pub fn muzzle_position(center: &Position, aim_angle: f64) -> Position {
    let forward = DVec2::new(aim_angle.cos(), aim_angle.sin());
    let right = DVec2::new(-aim_angle.sin(), aim_angle.cos());
    center.offset(forward * MUZZLE_FORWARD_OFFSET + right * MUZZLE_SIDE_OFFSET)
}
