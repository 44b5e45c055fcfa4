//! Error types for invalid geometry.

use thiserror::Error;

/// Errors reported when constructing planes or polygons from bad input.
///
/// Only constructors can fail; once a [`Plane`](crate::Plane) or
/// [`Polygon`](crate::Polygon) exists, every operation on it is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The (computed) plane normal has near-zero length.
    #[error("plane normal has near-zero length")]
    DegenerateNormal,

    /// Fewer than 3 distinct vertices remain after deduplication.
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    InsufficientVertices(usize),

    /// The vertices are all (nearly) collinear, so no plane can be derived.
    #[error("polygon vertices are collinear")]
    CollinearVertices,
}
