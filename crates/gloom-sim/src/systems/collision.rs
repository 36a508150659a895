//! Collision system: the fixed-order resolution pass run once per tick.
//!
//! 1. player ↔ wall
//! 2. mob ↔ wall (wandering mobs bounce)
//! 3. bullet ↔ wall (swept over the bullet's last step)
//! 4. bullet ↔ mob (deaths respawn immediately)
//! 5. player ↔ player
//! 6. mob ↔ mob
//! 7. player ↔ mob
//!
//! A single pass only corrects penetration; pile-ups of three or more bodies
//! settle over following ticks. A final clamp keeps every body inside the
//! world.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use gloom_core::components::{Bullet, Mob, MobBrain, Player};
use gloom_core::constants::*;
use gloom_core::events::GameEvent;
use gloom_core::types::{BulletId, MobId, PlayerId, Position, Rect};
use gloom_physics::collision::{
    circle_circle_push, circle_rect_push, circles_overlap, segment_hits_rect,
};
use gloom_procgen::GenerationParams;

use crate::registry::EntityRegistry;

/// A body taking part in circle separation.
type Body = (Entity, Position);

/// Run the full collision pass.
pub fn run<R: Rng + ?Sized>(
    registry: &mut EntityRegistry,
    params: &GenerationParams,
    walls: &[Rect],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    resolve_player_walls(registry.world_mut(), walls);
    resolve_mob_walls(registry.world_mut(), walls);
    remove_bullets_in_walls(registry, walls);
    resolve_bullet_hits(registry, params, walls, rng, events);
    separate_bodies(registry.world_mut());
    clamp_to_world(registry.world_mut(), params);
}

fn resolve_player_walls(world: &mut World, walls: &[Rect]) {
    for (_entity, (_player, pos)) in world.query_mut::<(&Player, &mut Position)>() {
        for wall in walls {
            if let Some(push) = circle_rect_push(pos, PLAYER_RADIUS, wall) {
                *pos = pos.offset(push);
            }
        }
    }
}

fn resolve_mob_walls(world: &mut World, walls: &[Rect]) {
    for (_entity, (mob, brain, pos)) in world.query_mut::<(&Mob, &mut MobBrain, &mut Position)>() {
        if !mob.alive {
            continue;
        }
        let mut bumped = false;
        for wall in walls {
            if let Some(push) = circle_rect_push(pos, MOB_RADIUS, wall) {
                *pos = pos.offset(push);
                bumped = true;
            }
        }
        if bumped && brain.aggro.is_none() {
            brain.direction = -brain.direction;
        }
    }
}

fn remove_bullets_in_walls(registry: &mut EntityRegistry, walls: &[Rect]) {
    let stopped: Vec<BulletId> = registry
        .world()
        .query::<(&Bullet, &Position)>()
        .iter()
        .filter(|(_, (bullet, pos))| {
            walls
                .iter()
                .any(|wall| segment_hits_rect(&bullet.last_position, pos, wall))
        })
        .map(|(_, (bullet, _))| bullet.id)
        .collect();

    for id in stopped {
        registry.despawn_bullet(id);
    }
}

/// Each bullet damages the first living mob (in id order) it overlaps and
/// is consumed. Dead mobs are replaced before the pass returns.
fn resolve_bullet_hits<R: Rng + ?Sized>(
    registry: &mut EntityRegistry,
    params: &GenerationParams,
    walls: &[Rect],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let mut bullets: Vec<(BulletId, Position)> = registry
        .world()
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(_, (bullet, pos))| (bullet.id, *pos))
        .collect();
    bullets.sort_by_key(|(id, _)| *id);

    let mut targets: Vec<(MobId, Position, i32)> = registry
        .world()
        .query::<(&Mob, &Position)>()
        .iter()
        .filter(|(_, (mob, _))| mob.alive)
        .map(|(_, (mob, pos))| (mob.id, *pos, mob.hp))
        .collect();
    targets.sort_by_key(|(id, _, _)| *id);

    for (bullet_id, bullet_pos) in bullets {
        let Some((mob, position, hp)) = targets
            .iter_mut()
            .find(|(_, pos, hp)| *hp > 0 && circles_overlap(&bullet_pos, BULLET_RADIUS, pos, MOB_RADIUS))
        else {
            continue;
        };

        registry.despawn_bullet(bullet_id);
        *hp -= BULLET_DAMAGE;
        let (mob, position) = (*mob, *position);
        if *hp <= 0 {
            events.push(GameEvent::MobDied { mob, position });
        } else {
            events.push(GameEvent::MobHit { mob, position });
        }
    }

    let mut dead = Vec::new();
    for (id, _, hp) in targets {
        let Some(entity) = registry.mob_entity(id) else {
            continue;
        };
        if let Ok(mut mob) = registry.world_mut().get::<&mut Mob>(entity) {
            mob.hp = hp.max(0);
            mob.alive = hp > 0;
        }
        if hp <= 0 {
            dead.push(id);
        }
    }

    for id in dead {
        registry.despawn_mob(id);
        let replacement = registry.spawn_mob(params, walls, rng);
        debug!("{id} died, respawned as {replacement}");
    }
}

/// Player-player, mob-mob, then player-mob half-push separation.
fn separate_bodies(world: &mut World) {
    let mut players: Vec<(PlayerId, Body)> = world
        .query::<(&Player, &Position)>()
        .iter()
        .map(|(entity, (player, pos))| (player.id, (entity, *pos)))
        .collect();
    players.sort_by_key(|(id, _)| *id);
    let mut players: Vec<Body> = players.into_iter().map(|(_, body)| body).collect();

    let mut mobs: Vec<(MobId, Body)> = world
        .query::<(&Mob, &Position)>()
        .iter()
        .filter(|(_, (mob, _))| mob.alive)
        .map(|(entity, (mob, pos))| (mob.id, (entity, *pos)))
        .collect();
    mobs.sort_by_key(|(id, _)| *id);
    let mut mobs: Vec<Body> = mobs.into_iter().map(|(_, body)| body).collect();

    separate_within(&mut players, PLAYER_RADIUS);
    separate_within(&mut mobs, MOB_RADIUS);
    separate_between(&mut players, PLAYER_RADIUS, &mut mobs, MOB_RADIUS);

    for (entity, position) in players.into_iter().chain(mobs) {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = position;
        }
    }
}

fn separate_within(bodies: &mut [Body], radius: f64) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if let Some((push_a, push_b)) =
                circle_circle_push(&bodies[i].1, radius, &bodies[j].1, radius)
            {
                bodies[i].1 = bodies[i].1.offset(push_a);
                bodies[j].1 = bodies[j].1.offset(push_b);
            }
        }
    }
}

fn separate_between(group_a: &mut [Body], radius_a: f64, group_b: &mut [Body], radius_b: f64) {
    for a in group_a.iter_mut() {
        for b in group_b.iter_mut() {
            if let Some((push_a, push_b)) = circle_circle_push(&a.1, radius_a, &b.1, radius_b) {
                a.1 = a.1.offset(push_a);
                b.1 = b.1.offset(push_b);
            }
        }
    }
}

fn clamp_to_world(world: &mut World, params: &GenerationParams) {
    for (_entity, (_player, pos)) in world.query_mut::<(&Player, &mut Position)>() {
        *pos = pos.clamped(PLAYER_RADIUS, params.width - PLAYER_RADIUS, params.height - PLAYER_RADIUS);
    }
    for (_entity, (_mob, pos)) in world.query_mut::<(&Mob, &mut Position)>() {
        *pos = pos.clamped(MOB_RADIUS, params.width - MOB_RADIUS, params.height - MOB_RADIUS);
    }
}
