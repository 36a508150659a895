//! Wall and lamp placement.

use log::{debug, warn};
use rand::Rng;

use gloom_core::constants::*;
use gloom_core::state::WorldLayout;
use gloom_core::types::{Lamp, Position, Rect};
use gloom_physics::collision::{circle_touches_rect, point_in_rects, rects_overlap};

/// World dimensions and target item counts for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub width: f64,
    pub height: f64,
    pub wall_count: usize,
    pub lamp_count: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            wall_count: WALL_COUNT,
            lamp_count: LAMP_COUNT,
        }
    }
}

impl GenerationParams {
    /// Centre of the world, also the player spawn point.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Generate the full static layout: walls first, then lamps around them.
pub fn generate_layout<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> WorldLayout {
    let walls = generate_walls(params, rng);
    let lamps = generate_lamps(params, &walls, rng);

    if walls.len() < params.wall_count || lamps.len() < params.lamp_count {
        warn!(
            "layout short of target: {}/{} walls, {}/{} lamps",
            walls.len(),
            params.wall_count,
            lamps.len(),
            params.lamp_count
        );
    } else {
        debug!("layout generated: {} walls, {} lamps", walls.len(), lamps.len());
    }

    WorldLayout { walls, lamps }
}

/// Place up to `params.wall_count` walls.
///
/// A wall is accepted when it keeps `WALL_PADDING` away from every wall
/// already placed and does not reach into the spawn-safe circle.
pub fn generate_walls<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> Vec<Rect> {
    let center = params.center();
    let mut walls: Vec<Rect> = Vec::with_capacity(params.wall_count);

    for _ in 0..params.wall_count {
        let placed = (0..WALL_MAX_ATTEMPTS).find_map(|_| {
            let candidate = random_wall(params, rng);
            wall_fits(&candidate, &walls, &center).then_some(candidate)
        });
        if let Some(wall) = placed {
            walls.push(wall);
        }
    }

    walls
}

/// Place up to `params.lamp_count` lamps clear of `walls` and of each other.
pub fn generate_lamps<R: Rng + ?Sized>(
    params: &GenerationParams,
    walls: &[Rect],
    rng: &mut R,
) -> Vec<Lamp> {
    let min_sep_sq = LAMP_MIN_SEPARATION * LAMP_MIN_SEPARATION;
    let mut lamps: Vec<Lamp> = Vec::with_capacity(params.lamp_count);

    for _ in 0..params.lamp_count {
        let placed = (0..LAMP_MAX_ATTEMPTS).find_map(|_| {
            let point = Position::new(
                sample(rng, LAMP_EDGE_MARGIN, params.width - LAMP_EDGE_MARGIN),
                sample(rng, LAMP_EDGE_MARGIN, params.height - LAMP_EDGE_MARGIN),
            );
            if point_in_rects(&point, walls, LAMP_WALL_PADDING) {
                return None;
            }
            if lamps
                .iter()
                .any(|lamp| lamp.position().distance_sq_to(&point) < min_sep_sq)
            {
                return None;
            }
            Some(point)
        });

        if let Some(point) = placed {
            let range = LAMP_RANGE + sample(rng, -LAMP_RANGE_JITTER, LAMP_RANGE_JITTER);
            lamps.push(Lamp {
                x: point.x,
                y: point.y,
                range,
            });
        }
    }

    lamps
}

fn random_wall<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> Rect {
    let width = sample(rng, WALL_MIN_SIZE, WALL_MAX_SIZE);
    let height = sample(rng, WALL_MIN_SIZE, WALL_MAX_SIZE);
    let x = sample(rng, WALL_EDGE_MARGIN, params.width - WALL_EDGE_MARGIN - width);
    let y = sample(rng, WALL_EDGE_MARGIN, params.height - WALL_EDGE_MARGIN - height);
    Rect::new(x, y, width, height)
}

fn wall_fits(candidate: &Rect, walls: &[Rect], center: &Position) -> bool {
    !circle_touches_rect(center, SPAWN_SAFE_RADIUS, candidate)
        && !walls
            .iter()
            .any(|wall| rects_overlap(wall, candidate, WALL_PADDING))
}

/// Uniform draw from `[lo, hi]`; collapses to `lo` for an empty range.
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}
