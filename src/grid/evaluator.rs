use geo::coord;
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Instant;

use super::GridRange;
use crate::error::{CastError, Result};
use crate::faces::PolygonMap;

/// Inside/outside classification of every cell in a grid range
///
/// Stored densely, one column of Y values per X. An empty range yields a
/// map with no entries at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentMap {
    range: GridRange,
    cells: Vec<bool>,
}

impl ContainmentMap {
    /// All-`value` map for `range`, failing when the cell count overflows
    /// `usize` or cannot be allocated
    fn filled(range: GridRange, value: bool) -> Result<Self> {
        let too_large = || CastError::GridTooLarge {
            min_x: range.min_x,
            max_x: range.max_x,
            min_y: range.min_y,
            max_y: range.max_y,
        };
        let len = range
            .cell_count()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, value);

        Ok(Self { range, cells })
    }

    pub fn range(&self) -> &GridRange {
        &self.range
    }

    /// True when the map has no X entries
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_empty() || !self.range.contains(x, y) {
            return None;
        }
        let col = (x as i64 - self.range.min_x as i64) as usize;
        let row = (y as i64 - self.range.min_y as i64) as usize;
        Some(col * self.range.height() + row)
    }

    /// Classification of (x, y), `None` outside the evaluated range
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// All Y classifications for one X, ordered by Y
    pub fn column(&self, x: i32) -> Option<&[bool]> {
        let start = self.index(x, self.range.min_y)?;
        Some(&self.cells[start..start + self.range.height()])
    }

    /// X keys present in the map
    pub fn xs(&self) -> RangeInclusive<i32> {
        if self.is_empty() {
            1..=0
        } else {
            self.range.xs()
        }
    }

    /// Y keys present under every X
    pub fn ys(&self) -> RangeInclusive<i32> {
        if self.is_empty() {
            1..=0
        } else {
            self.range.ys()
        }
    }

    /// Every (x, y, inside) triple, X-major
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, bool)> + '_ {
        self.xs()
            .flat_map(move |x| self.ys().map(move |y| (x, y)))
            .zip(self.cells.iter().copied())
            .map(|((x, y), inside)| (x, y, inside))
    }

    pub fn inside_count(&self) -> usize {
        self.cells.iter().filter(|&&inside| inside).count()
    }

    /// Two-level X -> (Y -> inside) view
    pub fn to_nested(&self) -> BTreeMap<i32, BTreeMap<i32, bool>> {
        let mut nested: BTreeMap<i32, BTreeMap<i32, bool>> = BTreeMap::new();
        for (x, y, inside) in self.iter() {
            nested.entry(x).or_default().insert(y, inside);
        }
        nested
    }
}

/// One X column serialized as a Y -> bool map
struct Column<'a> {
    ys: RangeInclusive<i32>,
    cells: &'a [bool],
}

impl Serialize for Column<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (y, inside) in self.ys.clone().zip(self.cells) {
            map.serialize_entry(&y, inside)?;
        }
        map.end()
    }
}

impl Serialize for ContainmentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.range.width()))?;
        for x in self.xs() {
            if let Some(cells) = self.column(x) {
                let column = Column {
                    ys: self.ys(),
                    cells,
                };
                map.serialize_entry(&x, &column)?;
            }
        }
        map.end()
    }
}

/// Classify every integer point of `range` against all polygons
///
/// A point is inside when any polygon of any group contains it. Fails with
/// [`CastError::GridTooLarge`] before scanning if the grid cannot be held in
/// memory.
pub fn evaluate(range: &GridRange, polygons: &PolygonMap) -> Result<ContainmentMap> {
    let start = Instant::now();
    let mut map = ContainmentMap::filled(*range, false)?;
    if map.is_empty() {
        return Ok(map);
    }

    let height = range.height();
    for (col, x) in range.xs().enumerate() {
        for (row, y) in range.ys().enumerate() {
            let point = coord! { x: x as f64, y: y as f64 };
            map.cells[col * height + row] = polygons.polygons().any(|p| p.contains(point));
        }
    }

    debug!(
        "Calculated {} cells ({} inside) in {:?}",
        map.cells.len(),
        map.inside_count(),
        start.elapsed()
    );

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Face, FaceGroup};
    use crate::faces::build_polygons;

    fn square_face() -> Face {
        Face::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    fn polygons(groups: Vec<FaceGroup>) -> PolygonMap {
        build_polygons(&groups).unwrap()
    }

    #[test]
    fn test_square_scenario() {
        let map = evaluate(
            &GridRange::new(0, 10, 0, 10),
            &polygons(vec![FaceGroup::new("A", vec![square_face()])]),
        )
        .unwrap();

        assert_eq!(map.get(5, 5), Some(true));
        assert_eq!(map.get(0, 0), Some(true));
        assert_eq!(map.get(10, 10), Some(false));
        assert_eq!(map.get(10, 3), Some(false));
        assert_eq!(map.get(15, 15), None);
        // half-open: [0, 10) x [0, 10)
        assert_eq!(map.inside_count(), 100);
    }

    #[test]
    fn test_outside_point_in_wider_grid() {
        let map = evaluate(
            &GridRange::new(0, 20, 0, 20),
            &polygons(vec![FaceGroup::new("A", vec![square_face()])]),
        )
        .unwrap();
        assert_eq!(map.get(15, 15), Some(false));
    }

    #[test]
    fn test_disjunction_across_groups() {
        let first = Face::from_xy(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let second = Face::from_xy(&[(10.0, 10.0), (16.0, 10.0), (10.0, 16.0)]);
        let map = evaluate(
            &GridRange::new(0, 20, 0, 20),
            &polygons(vec![
                FaceGroup::new("first", vec![first]),
                FaceGroup::new("second", vec![second]),
            ]),
        )
        .unwrap();

        assert_eq!(map.get(11, 11), Some(true));
        assert_eq!(map.get(1, 1), Some(true));
        assert_eq!(map.get(7, 7), Some(false));
    }

    #[test]
    fn test_group_without_faces_is_all_false() {
        let map = evaluate(
            &GridRange::new(-3, 3, -3, 3),
            &polygons(vec![FaceGroup::new("empty", vec![])]),
        )
        .unwrap();
        assert_eq!(map.range().width(), 7);
        assert_eq!(map.inside_count(), 0);
        assert!(map.iter().all(|(_, _, inside)| !inside));
    }

    #[test]
    fn test_hole_is_not_subtracted() {
        let outer = Face::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hole = Face::from_xy(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]);
        let map = evaluate(
            &GridRange::new(0, 10, 0, 10),
            &polygons(vec![FaceGroup::new("donut", vec![outer, hole])]),
        )
        .unwrap();

        // union semantics: the hole is just another polygon
        assert_eq!(map.get(5, 5), Some(true));
    }

    #[test]
    fn test_empty_ranges_yield_empty_maps() {
        let polys = polygons(vec![FaceGroup::new("A", vec![square_face()])]);
        for range in [GridRange::new(5, 4, 0, 10), GridRange::new(0, 10, 5, 4)] {
            let map = evaluate(&range, &polys).unwrap();
            assert!(map.is_empty());
            assert_eq!(map.xs().count(), 0);
            assert!(map.to_nested().is_empty());
            assert_eq!(map.get(0, 0), None);
        }
    }

    #[test]
    fn test_range_completeness() {
        let map = evaluate(
            &GridRange::new(-2, 3, 7, 9),
            &polygons(vec![FaceGroup::new("A", vec![square_face()])]),
        )
        .unwrap();
        let nested = map.to_nested();

        assert_eq!(nested.keys().copied().collect::<Vec<_>>(), vec![-2, -1, 0, 1, 2, 3]);
        for row in nested.values() {
            assert_eq!(row.keys().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
        }
        assert_eq!(map.column(0), Some(&[true, true, true][..]));
        assert_eq!(map.column(-1), Some(&[false, false, false][..]));
    }

    #[test]
    fn test_degenerate_polygons_are_neutral() {
        let degenerate = vec![
            Face::default(),
            Face::from_xy(&[(5.0, 5.0)]),
            Face::from_xy(&[(0.0, 0.0), (10.0, 10.0)]),
        ];
        let map = evaluate(
            &GridRange::new(0, 10, 0, 10),
            &polygons(vec![FaceGroup::new("flat", degenerate)]),
        )
        .unwrap();
        assert_eq!(map.inside_count(), 0);
    }

    #[test]
    fn test_adding_polygons_never_removes_cells() {
        let range = GridRange::new(-5, 15, -5, 15);
        let base = vec![FaceGroup::new("A", vec![square_face()])];
        let mut more = base.clone();
        more.push(FaceGroup::new(
            "B",
            vec![Face::from_xy(&[(5.0, -5.0), (15.0, 5.0), (5.0, 15.0), (-5.0, 5.0)])],
        ));

        let before = evaluate(&range, &polygons(base)).unwrap();
        let after = evaluate(&range, &polygons(more)).unwrap();

        for (x, y, inside) in before.iter() {
            if inside {
                assert_eq!(after.get(x, y), Some(true), "lost ({}, {})", x, y);
            }
        }
        assert!(after.inside_count() > before.inside_count());
    }

    #[test]
    fn test_deterministic_regardless_of_group_order() {
        let a = FaceGroup::new("a", vec![Face::from_xy(&[(0.0, 0.0), (6.0, 1.0), (2.0, 7.0)])]);
        let b = FaceGroup::new("b", vec![Face::from_xy(&[(3.0, 3.0), (9.0, 2.5), (8.0, 9.0)])]);
        let range = GridRange::new(0, 10, 0, 10);

        let forward = evaluate(&range, &polygons(vec![a.clone(), b.clone()])).unwrap();
        let again = evaluate(&range, &polygons(vec![a.clone(), b.clone()])).unwrap();
        let reversed = evaluate(&range, &polygons(vec![b, a])).unwrap();

        assert_eq!(forward, again);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_json_uses_string_coordinate_keys() {
        let map = evaluate(
            &GridRange::new(-1, 0, 0, 1),
            &polygons(vec![FaceGroup::new("A", vec![square_face()])]),
        )
        .unwrap();
        let json = serde_json::to_value(&map).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "-1": { "0": false, "1": false },
                "0": { "0": true, "1": true },
            })
        );
    }

    #[test]
    fn test_full_i32_grid_is_rejected() {
        let range = GridRange::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX);
        let err = evaluate(&range, &PolygonMap::new()).unwrap_err();

        assert_eq!(
            err,
            CastError::GridTooLarge {
                min_x: i32::MIN,
                max_x: i32::MAX,
                min_y: i32::MIN,
                max_y: i32::MAX,
            }
        );
    }
}
