// src/geometry.rs

use glam::{DVec2, IVec2};

/// A cell position on the density grid. `x` is the column, `y` the row.
pub type Point = IVec2;

/// Rounds a continuous position to the nearest cell, halves away from zero.
#[inline]
pub fn snap_to_grid(position: DVec2) -> Point {
    // `as` saturates, so far-off extrapolations stay representable
    IVec2::new(position.x.round() as i32, position.y.round() as i32)
}

#[inline]
pub fn to_continuous(point: Point) -> DVec2 {
    point.as_dvec2()
}
