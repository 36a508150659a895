//! Projectile system: straight-line bullet movement and expiry.

use gloom_core::components::Bullet;
use gloom_core::constants::BULLET_LIFETIME_MS;
use gloom_core::types::{BulletId, Position, Velocity};
use gloom_procgen::GenerationParams;

use crate::registry::EntityRegistry;

/// Advance every bullet and remove those that left the world or outlived
/// their lifetime.
pub fn run(registry: &mut EntityRegistry, params: &GenerationParams, now_ms: f64, dt_secs: f64) {
    let mut expired: Vec<BulletId> = Vec::new();

    for (_entity, (bullet, pos, vel)) in registry
        .world_mut()
        .query_mut::<(&mut Bullet, &mut Position, &Velocity)>()
    {
        bullet.last_position = *pos;
        *pos = pos.offset(vel.displacement(dt_secs));

        let outside = pos.x < 0.0 || pos.x > params.width || pos.y < 0.0 || pos.y > params.height;
        if outside || now_ms - bullet.created_ms >= BULLET_LIFETIME_MS {
            expired.push(bullet.id);
        }
    }

    for id in expired {
        registry.despawn_bullet(id);
    }
}
