use std::ops::RangeInclusive;

use crate::geometry::Bounds;

/// Inclusive integer grid bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl GridRange {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Smallest grid covering `bounds`, rounded outward
    ///
    /// `None` when a rounded bound does not fit in `i32`.
    pub fn covering(bounds: &Bounds) -> Option<Self> {
        Some(Self {
            min_x: to_grid(bounds.min_x.floor())?,
            max_x: to_grid(bounds.max_x.ceil())?,
            min_y: to_grid(bounds.min_y.floor())?,
            max_y: to_grid(bounds.max_y.ceil())?,
        })
    }

    /// True when either axis has no integers
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Number of X columns, zero for an empty range
    pub fn width(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_x as i64 - self.min_x as i64 + 1) as usize
        }
    }

    /// Number of Y rows, zero for an empty range
    pub fn height(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_y as i64 - self.min_y as i64 + 1) as usize
        }
    }

    /// Total cells, `None` on overflow
    pub fn cell_count(&self) -> Option<u64> {
        (self.width() as u64).checked_mul(self.height() as u64)
    }

    pub fn xs(&self) -> RangeInclusive<i32> {
        self.min_x..=self.max_x
    }

    pub fn ys(&self) -> RangeInclusive<i32> {
        self.min_y..=self.max_y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.xs().contains(&x) && self.ys().contains(&y)
    }
}

fn to_grid(value: f64) -> Option<i32> {
    (value >= i32::MIN as f64 && value <= i32::MAX as f64).then_some(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let range = GridRange::new(-2, 2, 0, 9);
        assert_eq!(range.width(), 5);
        assert_eq!(range.height(), 10);
        assert_eq!(range.cell_count(), Some(50));
        assert!(range.contains(-2, 9));
        assert!(!range.contains(3, 0));
    }

    #[test]
    fn test_empty_ranges() {
        for range in [GridRange::new(1, 0, 0, 5), GridRange::new(0, 5, 3, 2)] {
            assert!(range.is_empty());
            assert_eq!(range.width(), 0);
            assert_eq!(range.height(), 0);
            assert_eq!(range.cell_count(), Some(0));
        }
    }

    #[test]
    fn test_full_i32_span() {
        let range = GridRange::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX);
        assert_eq!(range.width(), 1usize << 32);
        assert_eq!(range.cell_count(), None);
    }

    #[test]
    fn test_covering_rounds_outward() {
        let bounds = Bounds {
            min_x: -0.5,
            max_x: 3.2,
            min_y: 1.0,
            max_y: 1.0,
        };
        assert_eq!(
            GridRange::covering(&bounds),
            Some(GridRange::new(-1, 4, 1, 1))
        );
    }

    #[test]
    fn test_covering_rejects_bounds_past_i32() {
        let edge = Bounds {
            min_x: i32::MIN as f64,
            max_x: i32::MAX as f64,
            min_y: 0.0,
            max_y: 0.0,
        };
        assert!(GridRange::covering(&edge).is_some());

        let beyond = Bounds {
            min_x: 0.0,
            max_x: i32::MAX as f64 + 0.5,
            min_y: 0.0,
            max_y: 0.0,
        };
        assert_eq!(GridRange::covering(&beyond), None);

        let far = Bounds {
            min_x: 0.0,
            max_x: 1.0,
            min_y: -1e12,
            max_y: 0.0,
        };
        assert_eq!(GridRange::covering(&far), None);
    }
}
