use crate::domain::Point;

/// Axis-aligned bounding rectangle in plane coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut bounds = Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        };
        bounds.expand(points);

        Some(bounds)
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[Point]) {
        for p in points {
            self.min_x = self.min_x.min(p.x);
            self.max_x = self.max_x.max(p.x);
            self.min_y = self.min_y.min(p.y);
            self.max_y = self.max_y.max(p.y);
        }
    }

    /// Smallest bounds covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1000.0, y: 2000.0 },
            coord! { x: 500.0, y: -10.0 },
        ];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_y, -10.0);
        assert_eq!(bounds.max_y, 2000.0);
        assert_eq!(bounds.width(), 1000.0);
        assert_eq!(bounds.height(), 2010.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::from_points(&[coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]).unwrap();
        let b = Bounds::from_points(&[coord! { x: -3.0, y: 0.5 }, coord! { x: 0.5, y: 7.0 }]).unwrap();
        let u = a.union(&b);

        assert_eq!(u.min_x, -3.0);
        assert_eq!(u.max_x, 1.0);
        assert_eq!(u.min_y, 0.0);
        assert_eq!(u.max_y, 7.0);
    }
}
