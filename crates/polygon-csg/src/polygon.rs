//! Convex polygon representation with a derived plane and bounds.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::bounds::Bounds;
use crate::error::GeometryError;
use crate::plane::{Classification, EPSILON, Plane, PlaneSide};

/// A convex polygon in 3D space, defined by an ordered ring of vertices.
///
/// Vertices must be coplanar and in counter-clockwise winding order when
/// viewed from the front (the direction the normal points). The supporting
/// plane and the bounding box are derived once at construction and cached.
///
/// The type parameter `S` is an opaque tag carried along by every fragment
/// an operation produces (a surface id, a material, a color). The engine
/// clones it and never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone = ()> {
    vertices: Vec<Point3<f64>>,
    plane: Plane,
    bounds: Bounds,
    tag: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Creates a new polygon from a ring of vertices.
    ///
    /// Consecutive vertices closer than [`EPSILON`] are merged (including
    /// the closing edge). Fails when fewer than 3 distinct vertices remain,
    /// or when the vertices are collinear.
    pub fn new(vertices: Vec<Point3<f64>>) -> Result<Self, GeometryError> {
        Self::with_tag(vertices, None)
    }

    /// Creates a new polygon carrying a tag.
    pub fn with_tag(
        mut vertices: Vec<Point3<f64>>,
        tag: Option<S>,
    ) -> Result<Self, GeometryError> {
        vertices.dedup_by(|a, b| (*a - *b).norm() < EPSILON);
        while vertices.len() > 1 {
            let first = vertices[0];
            let last = vertices[vertices.len() - 1];
            if (last - first).norm() < EPSILON {
                vertices.pop();
            } else {
                break;
            }
        }

        if vertices.len() < 3 {
            return Err(GeometryError::InsufficientVertices(vertices.len()));
        }

        let plane = derive_plane(&vertices)?;
        debug_assert!(
            vertices
                .iter()
                .all(|v| plane.classify_point(*v) == PlaneSide::OnPlane),
            "Polygon vertices must be coplanar"
        );
        let bounds = Bounds::from_points(&vertices);

        Ok(Self {
            vertices,
            plane,
            bounds,
            tag,
        })
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the supporting plane of the polygon.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the axis-aligned bounding box of the polygon.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the tag carried by this polygon, if any.
    #[inline]
    pub fn tag(&self) -> Option<&S> {
        self.tag.as_ref()
    }

    /// Computes the centroid (average of the vertices) of the polygon.
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Front` if all vertices are in front of the plane
    /// - `Back` if all vertices are behind the plane
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point(*vertex) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        if on_plane == self.vertices.len() {
            Classification::Coplanar
        } else if back == 0 {
            Classification::Front
        } else if front == 0 {
            Classification::Back
        } else {
            Classification::Spanning
        }
    }

    /// Splits this polygon along a plane.
    ///
    /// Returns `(front, back)` fragment lists; each holds zero or one
    /// polygon. A coplanar polygon lands whole on the side its normal
    /// agrees with.
    pub fn split(&self, along: &Plane) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let (front, back) = along.split_polygon(self);
        (
            front.into_iter().collect(),
            back.into_iter().collect(),
        )
    }

    /// Clips this polygon to the front half-space of a plane.
    ///
    /// Returns zero or one fragment.
    pub fn clip(&self, to: &Plane) -> Vec<Polygon<S>> {
        to.clip_polygon(self).into_iter().collect()
    }

    /// Returns this polygon with reversed winding.
    ///
    /// The normal (and supporting plane) point the opposite way; the
    /// bounds and tag are unchanged.
    pub fn flipped(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            plane: self.plane.flipped(),
            bounds: self.bounds,
            tag: self.tag.clone(),
        }
    }

    /// Returns this polygon translated by an offset.
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        let vertices: Vec<_> = self.vertices.iter().map(|v| v + offset).collect();
        let bounds = Bounds::from_points(&vertices);
        let plane = Plane::from_normalized(
            self.plane.normal(),
            self.plane.offset() + self.plane.normal().dot(&offset),
        );
        Self {
            vertices,
            plane,
            bounds,
            tag: self.tag.clone(),
        }
    }

    /// Returns this polygon transformed by a rigid isometry.
    ///
    /// Isometries preserve winding, so the transformed plane is the rotated
    /// normal through the transformed vertices.
    pub fn transformed(&self, isometry: &Isometry3<f64>) -> Self {
        let vertices: Vec<_> = self
            .vertices
            .iter()
            .map(|v| isometry.transform_point(v))
            .collect();
        let bounds = Bounds::from_points(&vertices);
        let normal = isometry * self.plane.normal();
        let plane = Plane::from_normalized(normal, normal.dot(&vertices[0].coords));
        Self {
            vertices,
            plane,
            bounds,
            tag: self.tag.clone(),
        }
    }

    /// Returns the outward-oriented edge planes of this polygon.
    ///
    /// Each edge plane is perpendicular to the polygon's supporting plane,
    /// passes through one edge, and faces away from the interior. A convex
    /// polygon is exactly the intersection of the back half-spaces of its
    /// edge planes (within its supporting plane).
    pub fn edge_planes(&self) -> impl Iterator<Item = Plane> + '_ {
        let normal = self.plane.normal();
        let count = self.vertices.len();
        (0..count).filter_map(move |i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % count];
            Plane::from_point_and_normal(a, (b - a).cross(&normal)).ok()
        })
    }

    /// Partitions this polygon against a set of coplanar faces.
    ///
    /// Returns `(outside, inside)`: fragments covered by none of the faces,
    /// and fragments covered by at least one. The polygon is clipped against
    /// each face's edge-plane fan in turn; whatever survives in front of any
    /// edge plane moves on to the next face.
    pub fn clip_to_faces<'a, I>(&self, faces: I) -> (Vec<Polygon<S>>, Vec<Polygon<S>>)
    where
        S: 'a,
        I: IntoIterator<Item = &'a Polygon<S>>,
    {
        let mut inside = Vec::new();
        let mut to_test = vec![self.clone()];

        for face in faces {
            if to_test.is_empty() {
                break;
            }
            let mut still_outside = Vec::new();
            for fragment in to_test {
                face.partition_by_edges(fragment, &mut inside, &mut still_outside);
            }
            to_test = still_outside;
        }

        (to_test, inside)
    }

    /// Clips a coplanar fragment against this polygon's edge planes.
    ///
    /// Pieces in front of any edge plane are outside this polygon; the
    /// remainder behind every edge plane is inside.
    fn partition_by_edges(
        &self,
        fragment: Polygon<S>,
        inside: &mut Vec<Polygon<S>>,
        outside: &mut Vec<Polygon<S>>,
    ) {
        let mut remainder = fragment;
        for edge_plane in self.edge_planes() {
            let (front, back) = edge_plane.split_polygon(&remainder);
            if let Some(front) = front {
                outside.push(front);
            }
            match back {
                Some(back) => remainder = back,
                None => return,
            }
        }
        inside.push(remainder);
    }
}

/// Derives the supporting plane from the first non-collinear vertex triple.
fn derive_plane(vertices: &[Point3<f64>]) -> Result<Plane, GeometryError> {
    let anchor = vertices[0];
    for i in 1..vertices.len() - 1 {
        let normal = (vertices[i] - anchor).cross(&(vertices[i + 1] - anchor));
        if normal.norm() > EPSILON {
            return Plane::from_point_and_normal(anchor, normal);
        }
    }
    Err(GeometryError::CollinearVertices)
}
