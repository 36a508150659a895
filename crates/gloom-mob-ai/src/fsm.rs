//! Mob behavior finite state machine.
//!
//! Two states: `Wandering` (initial) and `Aggroed`. The ECS side decides
//! *who* a mob targets (see [`select_target`]) and feeds the live target
//! position in; [`evaluate`] decides how the mob moves and whether it
//! attacks this tick. No ECS dependency, operates on plain data.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use gloom_core::enums::MobState;
use gloom_core::types::{PlayerId, Position, Velocity};

use crate::profiles::MobProfile;

/// Input to the FSM for a single mob.
#[derive(Debug, Clone, Copy)]
pub struct MobContext {
    pub state: MobState,
    pub position: Position,
    /// Live position of the target player, `None` while wandering.
    pub target: Option<Position>,
    /// Current unit heading.
    pub direction: DVec2,
    pub direction_timer_ms: f64,
    pub last_attack_ms: Option<f64>,
    pub now_ms: f64,
    pub dt_ms: f64,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobUpdate {
    pub velocity: Velocity,
    pub direction: DVec2,
    pub direction_timer_ms: f64,
    /// Damage dealt to the target this tick, if an attack landed.
    pub attack_damage: Option<i32>,
}

/// Evaluate the FSM for one mob.
pub fn evaluate<R: Rng + ?Sized>(ctx: &MobContext, profile: &MobProfile, rng: &mut R) -> MobUpdate {
    let timer = ctx.direction_timer_ms + ctx.dt_ms;

    match (ctx.state, ctx.target) {
        (MobState::Aggroed, Some(target)) => evaluate_aggroed(ctx, &target, timer, profile, rng),
        _ => evaluate_wandering(ctx, timer, profile, rng),
    }
}

fn evaluate_aggroed<R: Rng + ?Sized>(
    ctx: &MobContext,
    target: &Position,
    timer: f64,
    profile: &MobProfile,
    rng: &mut R,
) -> MobUpdate {
    let diff = ctx.position.delta_to(target);
    let dist = diff.length();

    let attack_damage = (dist <= profile.attack_range
        && attack_ready(ctx.last_attack_ms, ctx.now_ms, profile))
    .then(|| roll_attack_damage(profile, rng));

    if dist > profile.stop_radius {
        let direction = diff / dist;
        MobUpdate {
            velocity: Velocity::from(direction * profile.speed),
            direction,
            direction_timer_ms: timer,
            attack_damage,
        }
    } else {
        // Close enough: hold position and swing.
        MobUpdate {
            velocity: Velocity::ZERO,
            direction: ctx.direction,
            direction_timer_ms: timer,
            attack_damage,
        }
    }
}

fn evaluate_wandering<R: Rng + ?Sized>(
    ctx: &MobContext,
    timer: f64,
    profile: &MobProfile,
    rng: &mut R,
) -> MobUpdate {
    let (direction, timer) = if timer >= profile.direction_change_interval_ms {
        (random_direction(rng), 0.0)
    } else {
        (ctx.direction, timer)
    };

    MobUpdate {
        velocity: Velocity::from(direction * profile.speed),
        direction,
        direction_timer_ms: timer,
        attack_damage: None,
    }
}

/// First player (in the given order) strictly inside the aggro radius.
pub fn select_target<I>(position: &Position, players: I, profile: &MobProfile) -> Option<PlayerId>
where
    I: IntoIterator<Item = (PlayerId, Position)>,
{
    let radius_sq = profile.aggro_radius * profile.aggro_radius;
    players
        .into_iter()
        .find(|(_, player_pos)| position.distance_sq_to(player_pos) < radius_sq)
        .map(|(id, _)| id)
}

/// Whether the attack cooldown has elapsed.
pub fn attack_ready(last_attack_ms: Option<f64>, now_ms: f64, profile: &MobProfile) -> bool {
    last_attack_ms.map_or(true, |last| now_ms - last >= profile.attack_cooldown_ms)
}

/// Uniform damage in `[damage_min, damage_max]`.
pub fn roll_attack_damage<R: Rng + ?Sized>(profile: &MobProfile, rng: &mut R) -> i32 {
    rng.gen_range(profile.damage_min..=profile.damage_max)
}

/// Uniformly random unit vector.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let angle: f64 = rng.gen_range(0.0..TAU);
    DVec2::new(angle.cos(), angle.sin())
}
