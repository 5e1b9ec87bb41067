//! Even-odd point-in-polygon test
//!
//! A horizontal ray is cast from the query point toward increasing X and the
//! edges it crosses are counted; an odd count means the point is inside.
//!
//! Boundary convention (half-open):
//! - an edge spans the Y interval `[min(y0, y1), max(y0, y1))`, so its lower
//!   endpoint counts and its upper endpoint does not
//! - a crossing exactly at the query X is not counted
//!
//! For an axis-aligned rectangle this assigns the left and bottom edges to
//! the rectangle and the right and top edges to the outside. Points exactly
//! on slanted edges follow whatever the f64 interpolation yields; no epsilon
//! is applied.

use crate::domain::Point;

/// Test whether `point` lies inside the closed ring `vertices`
///
/// Rings with fewer than three vertices never contain anything.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];

        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }

    inside
}
