use serde::de::{Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A single vertex as supplied by the caller
///
/// Accepts either a bare component array (`[x, y, z]`) or the wrapped form
/// (`{"value": [x, y, z]}`). Only the first two components are read and
/// must be numbers; anything after them is skipped unparsed, so
/// `[1, 2, null]` is a valid vertex.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Vertex {
    Components(#[serde(deserialize_with = "leading_xy")] Vec<f64>),
    Wrapped {
        #[serde(deserialize_with = "leading_xy")]
        value: Vec<f64>,
    },
}

/// Read at most two numeric components, ignoring the rest of the array
fn leading_xy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    struct LeadingXy;

    impl<'de> Visitor<'de> for LeadingXy {
        type Value = Vec<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an array of vertex components")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<f64>, A::Error> {
            let mut xy = Vec::with_capacity(2);
            while xy.len() < 2 {
                match seq.next_element::<f64>()? {
                    Some(component) => xy.push(component),
                    None => return Ok(xy),
                }
            }
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(xy)
        }
    }

    deserializer.deserialize_seq(LeadingXy)
}

impl Vertex {
    pub fn new(components: Vec<f64>) -> Self {
        Vertex::Components(components)
    }

    pub fn components(&self) -> &[f64] {
        match self {
            Vertex::Components(c) => c,
            Vertex::Wrapped { value } => value,
        }
    }
}

/// A mesh face: the vertex list of one polygon
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Face {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl Face {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Build a face from (x, y) pairs
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: points
                .iter()
                .map(|&(x, y)| Vertex::new(vec![x, y]))
                .collect(),
        }
    }
}

/// A labelled collection of faces
#[derive(Debug, Clone, Deserialize)]
pub struct FaceGroup {
    pub id: String,
    #[serde(default)]
    pub faces: Vec<Face>,
}

impl FaceGroup {
    pub fn new(id: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            id: id.into(),
            faces,
        }
    }
}
