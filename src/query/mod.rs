pub mod request;

pub use request::QueryRequest;

use crate::domain::FaceGroup;
use crate::error::Result;
use crate::faces::build_polygons;
use crate::grid::{ContainmentMap, GridRange, evaluate};

/// Classify every integer point of `range` against the faces of `groups`
///
/// Either the whole map is returned or the first input violation (or an
/// unallocatable grid) is reported; nothing partial is produced.
pub fn cast_rays(range: &GridRange, groups: &[FaceGroup]) -> Result<ContainmentMap> {
    let polygons = build_polygons(groups)?;
    evaluate(range, &polygons)
}
