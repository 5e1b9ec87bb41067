use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::domain::FaceGroup;
use crate::faces::{PolygonMap, build_polygons};
use crate::grid::{ContainmentMap, GridRange, evaluate};

/// A bulk containment query as read from JSON
///
/// ```json
/// {"minX": 0, "maxX": 10, "minY": 0, "maxY": 10,
///  "faceGroups": [{"id": "cube", "faces": [{"vertices": [[0, 0, 1], [10, 0, 1], [0, 10, 1]]}]}]}
/// ```
///
/// The bounds are optional as a set; without them the grid covers every
/// polygon.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub min_x: Option<i32>,
    #[serde(default)]
    pub max_x: Option<i32>,
    #[serde(default)]
    pub min_y: Option<i32>,
    #[serde(default)]
    pub max_y: Option<i32>,
    #[serde(default)]
    pub face_groups: Vec<FaceGroup>,
}

impl QueryRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse query JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read query file: {:?}", path))?;
        Self::from_json(&contents)
    }

    /// Explicit grid range, `None` if the query leaves it open
    pub fn range(&self) -> Result<Option<GridRange>> {
        match (self.min_x, self.max_x, self.min_y, self.max_y) {
            (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) => {
                Ok(Some(GridRange::new(min_x, max_x, min_y, max_y)))
            }
            (None, None, None, None) => Ok(None),
            _ => bail!("Query must give all of minX, maxX, minY and maxY, or none of them"),
        }
    }

    /// Grid to evaluate for `polygons`
    ///
    /// Without an explicit range the grid covers the bounds of all polygons;
    /// with no polygon points at all the range is empty.
    pub fn resolve_range(&self, polygons: &PolygonMap) -> Result<GridRange> {
        self.resolve_range_with(None, polygons)
    }

    /// Like [`resolve_range`](Self::resolve_range), but `explicit` wins over
    /// the query's own bounds. The query's bounds are still checked for
    /// completeness.
    pub fn resolve_range_with(
        &self,
        explicit: Option<GridRange>,
        polygons: &PolygonMap,
    ) -> Result<GridRange> {
        let own = self.range()?;
        if let Some(range) = explicit.or(own) {
            return Ok(range);
        }
        match polygons.bounds() {
            Some(bounds) => GridRange::covering(&bounds).with_context(|| {
                format!(
                    "Polygon bounds x {}..{}, y {}..{} exceed the integer grid",
                    bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
                )
            }),
            None => Ok(GridRange::new(0, -1, 0, -1)),
        }
    }

    /// Build polygons and evaluate the grid
    pub fn run(&self) -> Result<ContainmentMap> {
        let polygons = build_polygons(&self.face_groups)?;
        let range = self.resolve_range(&polygons)?;
        Ok(evaluate(&range, &polygons)?)
    }
}
