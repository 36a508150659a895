//! Mob AI system: target acquisition, FSM evaluation, movement and attacks.
//!
//! Calls the mob FSM from gloom-mob-ai for each mob in id order, then
//! applies the resulting velocity and damage to the ECS components.

use std::collections::HashMap;

use hecs::Entity;
use rand::Rng;

use gloom_core::components::{Aggro, Mob, MobBrain, Player};
use gloom_core::constants::{MOB_BOUNDS_MARGIN, MOB_RADIUS};
use gloom_core::events::GameEvent;
use gloom_core::types::{MobId, PlayerId, Position, Velocity};
use gloom_mob_ai::fsm::{evaluate, random_direction, select_target, MobContext};
use gloom_mob_ai::profiles::MobProfile;
use gloom_procgen::GenerationParams;

use crate::registry::EntityRegistry;

/// Run the mob AI system for one tick.
pub fn run<R: Rng + ?Sized>(
    registry: &mut EntityRegistry,
    params: &GenerationParams,
    profile: &MobProfile,
    now_ms: f64,
    dt_ms: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let players = registry.player_positions();
    let live_positions: HashMap<PlayerId, Position> = players.iter().copied().collect();

    let mut mobs: Vec<(MobId, Entity)> = registry
        .world()
        .query::<&Mob>()
        .iter()
        .filter(|(_, mob)| mob.alive)
        .map(|(entity, mob)| (mob.id, entity))
        .collect();
    mobs.sort_by_key(|(id, _)| *id);

    let margin = MOB_RADIUS + MOB_BOUNDS_MARGIN;
    let dt_secs = dt_ms / 1000.0;
    let mut damage: Vec<(PlayerId, i32)> = Vec::new();

    let world = registry.world_mut();
    for (mob_id, entity) in mobs {
        let Ok((brain, pos, vel)) =
            world.query_one_mut::<(&mut MobBrain, &mut Position, &mut Velocity)>(entity)
        else {
            continue;
        };

        if brain.aggro.is_none() {
            brain.aggro = select_target(pos, players.iter().copied(), profile).and_then(|player| {
                live_positions
                    .get(&player)
                    .map(|&position| Aggro { player, position })
            });
        }

        // Refresh the target from its live position; drop it if it vanished.
        if let Some(player) = brain.target() {
            match live_positions.get(&player) {
                Some(&position) => brain.aggro = Some(Aggro { player, position }),
                None => {
                    brain.aggro = None;
                    brain.direction = random_direction(rng);
                    brain.direction_timer_ms = 0.0;
                }
            }
        }

        let ctx = MobContext {
            state: brain.state(),
            position: *pos,
            target: brain.aggro.map(|aggro| aggro.position),
            direction: brain.direction,
            direction_timer_ms: brain.direction_timer_ms,
            last_attack_ms: brain.last_attack_ms,
            now_ms,
            dt_ms,
        };
        let update = evaluate(&ctx, profile, rng);

        if let (Some(amount), Some(target)) = (update.attack_damage, brain.target()) {
            brain.last_attack_ms = Some(now_ms);
            damage.push((target, amount));
            events.push(GameEvent::MobAttacked {
                mob: mob_id,
                position: *pos,
            });
        }

        brain.direction = update.direction;
        brain.direction_timer_ms = update.direction_timer_ms;
        *vel = update.velocity;
        *pos = pos
            .offset(vel.displacement(dt_secs))
            .clamped(margin, params.width - margin, params.height - margin);
    }

    for (player, amount) in damage {
        apply_damage(registry, player, amount);
    }
}

/// Subtract `amount` hp from a player, saturating at zero.
fn apply_damage(registry: &mut EntityRegistry, player: PlayerId, amount: i32) {
    let Some(entity) = registry.player_entity(player) else {
        return;
    };
    if let Ok(mut target) = registry.world_mut().get::<&mut Player>(entity) {
        target.hp = (target.hp - amount).max(0);
    }
}
