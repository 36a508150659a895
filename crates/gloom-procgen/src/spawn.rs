//! Random spawn points for mobs.

use rand::Rng;

use gloom_core::constants::*;
use gloom_core::types::{Position, Rect};
use gloom_physics::collision::point_in_rects;

use crate::layout::{sample, GenerationParams};

/// Draw a point clear of every wall (with `MOB_SPAWN_WALL_PADDING`) and
/// outside the central exclusion circle. Falls back to the world centre
/// once `MOB_SPAWN_MAX_ATTEMPTS` candidates have been rejected.
pub fn random_spawn_point<R: Rng + ?Sized>(
    params: &GenerationParams,
    walls: &[Rect],
    rng: &mut R,
) -> Position {
    let center = params.center();
    let exclusion_sq = MOB_SPAWN_EXCLUSION_RADIUS * MOB_SPAWN_EXCLUSION_RADIUS;

    for _ in 0..MOB_SPAWN_MAX_ATTEMPTS {
        let point = Position::new(
            sample(rng, MOB_SPAWN_EDGE_MARGIN, params.width - MOB_SPAWN_EDGE_MARGIN),
            sample(rng, MOB_SPAWN_EDGE_MARGIN, params.height - MOB_SPAWN_EDGE_MARGIN),
        );
        if point.distance_sq_to(&center) < exclusion_sq {
            continue;
        }
        if !point_in_rects(&point, walls, MOB_SPAWN_WALL_PADDING) {
            return point;
        }
    }

    center
}
