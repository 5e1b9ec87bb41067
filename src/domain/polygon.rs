use geo::{Area, LineString};

use crate::geometry::{Bounds, point_in_polygon};

/// A point in the projection plane
pub type Point = geo::Coord<f64>;

/// A simple polygon; the last point connects back to the first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than three points cannot enclose area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.points)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Enclosed area, independent of winding order
    pub fn area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let ring: LineString<f64> = self.points.iter().copied().collect();
        geo::Polygon::new(ring, vec![]).unsigned_area()
    }
}
