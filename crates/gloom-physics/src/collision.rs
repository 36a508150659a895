//! Circle/rectangle/point overlap tests and push-out vectors.
//!
//! Push vectors are minimal translations: adding the push to the circle's
//! centre separates the shapes (exactly, up to float rounding).

use glam::DVec2;

use gloom_core::types::{Position, Rect};

/// Push vector that moves a circle out of an axis-aligned rectangle.
///
/// Returns `None` when the circle does not penetrate the rectangle
/// (touching exactly at `radius` counts as separated).
pub fn circle_rect_push(center: &Position, radius: f64, rect: &Rect) -> Option<DVec2> {
    let closest = closest_point(center, rect);
    let diff = closest.delta_to(center);
    let dist_sq = diff.length_squared();

    if dist_sq >= radius * radius {
        return None;
    }

    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        return Some(diff / dist * (radius - dist));
    }

    // Centre inside the rectangle: leave along the axis of least penetration.
    let rect_center = rect.center();
    let dx = center.x - rect_center.x;
    let dy = center.y - rect_center.y;
    let overlap_x = rect.width / 2.0 - dx.abs() + radius;
    let overlap_y = rect.height / 2.0 - dy.abs() + radius;

    if overlap_x < overlap_y {
        let sign = if dx > 0.0 { 1.0 } else { -1.0 };
        Some(DVec2::new(sign * overlap_x, 0.0))
    } else {
        let sign = if dy > 0.0 { 1.0 } else { -1.0 };
        Some(DVec2::new(0.0, sign * overlap_y))
    }
}

/// Symmetric separation of two overlapping circles.
///
/// Returns `(push_a, push_b)`, each half of the penetration depth along the
/// separating normal. Coincident centres separate along the x axis.
pub fn circle_circle_push(
    a: &Position,
    radius_a: f64,
    b: &Position,
    radius_b: f64,
) -> Option<(DVec2, DVec2)> {
    let diff = b.delta_to(a);
    let dist_sq = diff.length_squared();
    let min_dist = radius_a + radius_b;

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let half = if dist_sq == 0.0 {
        DVec2::new(min_dist / 2.0, 0.0)
    } else {
        let dist = dist_sq.sqrt();
        diff / dist * ((min_dist - dist) / 2.0)
    };
    Some((half, -half))
}

/// Strict circle overlap test (used for bullet hits).
pub fn circles_overlap(a: &Position, radius_a: f64, b: &Position, radius_b: f64) -> bool {
    let min_dist = radius_a + radius_b;
    a.distance_sq_to(b) < min_dist * min_dist
}

/// Whether a circle reaches into a rectangle (closest-point test).
pub fn circle_touches_rect(center: &Position, radius: f64, rect: &Rect) -> bool {
    closest_point(center, rect).distance_sq_to(center) < radius * radius
}

/// Inclusive point containment with the rectangle grown by `padding` on every side.
pub fn point_in_rect(point: &Position, rect: &Rect, padding: f64) -> bool {
    point.x >= rect.x - padding
        && point.x <= rect.right() + padding
        && point.y >= rect.y - padding
        && point.y <= rect.bottom() + padding
}

/// Whether `point` lies in any of `rects` (padded).
pub fn point_in_rects(point: &Position, rects: &[Rect], padding: f64) -> bool {
    rects.iter().any(|rect| point_in_rect(point, rect, padding))
}

/// Whether two rectangles overlap or sit closer than `padding` apart.
pub fn rects_overlap(a: &Rect, b: &Rect, padding: f64) -> bool {
    !(a.right() + padding < b.x
        || b.right() + padding < a.x
        || a.bottom() + padding < b.y
        || b.bottom() + padding < a.y)
}

/// Whether the segment `from`→`to` passes through or ends inside `rect`
/// (boundary inclusive). Slab clipping on each axis.
pub fn segment_hits_rect(from: &Position, to: &Position, rect: &Rect) -> bool {
    let step = from.delta_to(to);
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    let axes = [
        (from.x, step.x, rect.x, rect.right()),
        (from.y, step.y, rect.y, rect.bottom()),
    ];
    for (start, delta, lo, hi) in axes {
        if delta == 0.0 {
            if start < lo || start > hi {
                return false;
            }
            continue;
        }
        let t_lo = (lo - start) / delta;
        let t_hi = (hi - start) / delta;
        t_enter = t_enter.max(t_lo.min(t_hi));
        t_exit = t_exit.min(t_lo.max(t_hi));
        if t_enter > t_exit {
            return false;
        }
    }
    true
}

fn closest_point(center: &Position, rect: &Rect) -> Position {
    Position::new(
        center.x.clamp(rect.x, rect.right()),
        center.y.clamp(rect.y, rect.bottom()),
    )
}
