use geo::coord;
use log::debug;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::domain::{FaceGroup, Point, Polygon, Vertex};
use crate::error::{CastError, Result};
use crate::geometry::Bounds;

/// Polygons keyed by face group identifier
///
/// Groups sharing an identifier are merged in input order.
#[derive(Debug, Clone, Default)]
pub struct PolygonMap {
    groups: BTreeMap<String, Vec<Polygon>>,
}

impl PolygonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append polygons under `id`, registering the id even when empty
    pub fn extend(&mut self, id: &str, polygons: impl IntoIterator<Item = Polygon>) {
        self.groups
            .entry(id.to_string())
            .or_default()
            .extend(polygons);
    }

    pub fn get(&self, id: &str) -> Option<&[Polygon]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Polygon])> {
        self.groups
            .iter()
            .map(|(id, polygons)| (id.as_str(), polygons.as_slice()))
    }

    /// Every polygon of every group
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.groups.values().flatten()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Bounds of all polygon points, `None` if there are none
    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons()
            .filter_map(Polygon::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn total_area(&self) -> f64 {
        self.polygons().map(Polygon::area).sum()
    }
}

/// Convert raw face groups into polygons
///
/// # Algorithm
/// 1. For each face, take the first two components of every vertex in order
/// 2. Collect the face polygons under the group identifier
///
/// Vertices with fewer than two components or non-finite X/Y are rejected
/// before anything is returned.
pub fn build_polygons(groups: &[FaceGroup]) -> Result<PolygonMap> {
    let start = Instant::now();
    let mut map = PolygonMap::new();

    for (group_idx, group) in groups.iter().enumerate() {
        let mut polygons = Vec::with_capacity(group.faces.len());

        for (face_idx, face) in group.faces.iter().enumerate() {
            let points = face
                .vertices
                .iter()
                .enumerate()
                .map(|(vertex_idx, vertex)| {
                    project_vertex(vertex).map_err(|reason| CastError::InvalidInput {
                        group: group_idx,
                        group_id: group.id.clone(),
                        face: face_idx,
                        vertex: vertex_idx,
                        reason,
                    })
                })
                .collect::<Result<Vec<Point>>>()?;

            polygons.push(Polygon::new(points));
        }

        map.extend(&group.id, polygons);
    }

    debug!(
        "Built {} polygons in {} groups in {:?}",
        map.polygon_count(),
        map.group_count(),
        start.elapsed()
    );

    Ok(map)
}

/// Drop everything past X and Y
fn project_vertex(vertex: &Vertex) -> std::result::Result<Point, String> {
    let components = vertex.components();
    let (x, y) = match components {
        [x, y, ..] => (*x, *y),
        _ => {
            return Err(format!(
                "expected at least 2 components, got {}",
                components.len()
            ));
        }
    };

    if !x.is_finite() || !y.is_finite() {
        return Err(format!("non-finite coordinate ({}, {})", x, y));
    }

    Ok(coord! { x: x, y: y })
}
