//! Plane representation and the polygon splitting primitive.

use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;
use crate::polygon::Polygon;

/// Tolerance for point classification.
/// Points within this distance of a plane are considered "on" the plane.
/// The same tolerance is used for vertex deduplication and degeneracy checks.
pub const EPSILON: f64 = 1e-8;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of the normal)
    Front,
    /// Point is behind the plane (negative side of the normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All vertices are in front of the plane
    Front,
    /// All vertices are behind the plane
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// Vertices are on both sides (spans the plane)
    Spanning,
}

/// An oriented plane in 3D space, represented as `normal · point = offset`.
///
/// The normal is always unit length; constructors normalize and fail on
/// degenerate input instead of producing an invalid plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// Fails with [`GeometryError::DegenerateNormal`] if the normal has
    /// near-zero length.
    pub fn new(normal: Vector3<f64>, offset: f64) -> Result<Self, GeometryError> {
        let norm = normal.norm();
        if norm < EPSILON {
            return Err(GeometryError::DegenerateNormal);
        }
        Ok(Self {
            normal: normal / norm,
            offset: offset / norm,
        })
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    pub fn from_point_and_normal(
        point: Point3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Self, GeometryError> {
        let norm = normal.norm();
        if norm < EPSILON {
            return Err(GeometryError::DegenerateNormal);
        }
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Ok(Self {
            normal: unit_normal,
            offset,
        })
    }

    /// Creates a plane from three non-collinear points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    pub fn from_three_points(
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
    ) -> Result<Self, GeometryError> {
        let ab = b - a;
        let ac = c - a;
        Self::from_point_and_normal(a, ab.cross(&ac))
    }

    /// Builds a plane from an already-normalized normal. Internal shortcut
    /// for operations that derive one valid plane from another.
    pub(crate) fn from_normalized(normal: Vector3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as the normal)
    /// - Negative: point is behind (opposite side from the normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on, within [`EPSILON`].
    pub fn classify_point(&self, point: Point3<f64>) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > EPSILON {
            PlaneSide::Front
        } else if dist < -EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where:
    /// - `t` is the interpolation parameter (0.0 = start, 1.0 = end)
    /// - `point` is the intersection point
    ///
    /// Returns `None` if the segment is parallel to the plane or doesn't intersect.
    pub fn intersect_segment(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
    ) -> Option<(f64, Point3<f64>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        // Segment is parallel to plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;

        // Intersection is outside the segment
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        let point = start + direction * t;
        Some((t, point))
    }

    /// Splits a polygon by this plane.
    ///
    /// Returns `(front, back)` where:
    /// - **Front**: `(Some(polygon), None)` - entirely in front
    /// - **Back**: `(None, Some(polygon))` - entirely behind
    /// - **Coplanar**: routed whole to the side its normal agrees with;
    ///   a polygon facing along this plane's normal counts as front
    /// - **Spanning**: `(Some(front_part), Some(back_part))`, with degenerate
    ///   pieces dropped
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (Option<Polygon<S>>, Option<Polygon<S>>) {
        match polygon.classify(self) {
            Classification::Front => (Some(polygon.clone()), None),
            Classification::Back => (None, Some(polygon.clone())),
            Classification::Coplanar => {
                if polygon.plane().normal().dot(&self.normal) > 0.0 {
                    (Some(polygon.clone()), None)
                } else {
                    (None, Some(polygon.clone()))
                }
            }
            Classification::Spanning => self.split_spanning(polygon),
        }
    }

    /// Splits a spanning polygon into front and back parts.
    ///
    /// Uses a variant of the Sutherland-Hodgman algorithm:
    /// walks the polygon edges and builds two vertex rings,
    /// adding intersection points when edges cross the plane.
    fn split_spanning<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (Option<Polygon<S>>, Option<Polygon<S>>) {
        let vertices = polygon.vertices();
        let n = vertices.len();

        let mut front_verts = Vec::with_capacity(n + 1);
        let mut back_verts = Vec::with_capacity(n + 1);

        let sides: Vec<PlaneSide> = vertices.iter().map(|v| self.classify_point(*v)).collect();

        for i in 0..n {
            let current = vertices[i];
            let next_idx = (i + 1) % n;

            match sides[i] {
                PlaneSide::Front => front_verts.push(current),
                PlaneSide::Back => back_verts.push(current),
                PlaneSide::OnPlane => {
                    // On-plane vertices go to both sides
                    front_verts.push(current);
                    back_verts.push(current);
                }
            }

            let crosses = matches!(
                (sides[i], sides[next_idx]),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            );

            if crosses {
                if let Some((_, intersection)) = self.intersect_segment(current, vertices[next_idx])
                {
                    front_verts.push(intersection);
                    back_verts.push(intersection);
                }
            }
        }

        (
            Polygon::with_tag(front_verts, polygon.tag().cloned()).ok(),
            Polygon::with_tag(back_verts, polygon.tag().cloned()).ok(),
        )
    }

    /// Splits a polygon by this plane and keeps only the front part.
    pub fn clip_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> Option<Polygon<S>> {
        self.split_polygon(polygon).0
    }
}
