//! Collision geometry for GLOOM.
//!
//! Pure functions over positions, radii and rectangles. No entity coupling:
//! both the world generator and the per-tick collision pass call into here.

pub use gloom_core as core;

pub mod collision;

pub use collision::{
    circle_circle_push, circle_rect_push, circle_touches_rect, circles_overlap, point_in_rect,
    point_in_rects, rects_overlap,
};
