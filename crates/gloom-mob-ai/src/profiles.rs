//! Mob behavioral profile.
//!
//! Consolidates the tuning parameters the FSM reads so tests can tweak them
//! without touching global constants.

use gloom_core::constants::*;

/// Behavioral parameters for a mob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobProfile {
    /// Movement speed while wandering or chasing (units/s).
    pub speed: f64,
    /// Distance at which an un-targeted mob notices a player.
    pub aggro_radius: f64,
    /// Distance at which a chasing mob halts.
    pub stop_radius: f64,
    /// Distance within which an attack may land.
    pub attack_range: f64,
    pub attack_cooldown_ms: f64,
    /// Inclusive damage range per attack.
    pub damage_min: i32,
    pub damage_max: i32,
    /// Wander direction change interval.
    pub direction_change_interval_ms: f64,
}

impl Default for MobProfile {
    fn default() -> Self {
        Self {
            speed: MOB_SPEED,
            aggro_radius: MOB_AGGRO_RADIUS,
            stop_radius: MOB_STOP_RADIUS,
            attack_range: MOB_ATTACK_RANGE,
            attack_cooldown_ms: MOB_ATTACK_COOLDOWN_MS,
            damage_min: MOB_DAMAGE_MIN,
            damage_max: MOB_DAMAGE_MAX,
            direction_change_interval_ms: MOB_DIRECTION_CHANGE_INTERVAL_MS,
        }
    }
}
