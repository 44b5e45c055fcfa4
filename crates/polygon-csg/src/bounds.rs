//! Axis-aligned bounding boxes.

use nalgebra::Point3;

use crate::polygon::Polygon;

/// An axis-aligned bounding box, stored as componentwise min and max corners.
///
/// The empty box is represented by the [`Bounds::EMPTY`] sentinel with
/// inverted infinite corners, so that `union` with it is an identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl Bounds {
    /// The empty bounding box: min at +infinity, max at -infinity.
    pub const EMPTY: Bounds = Bounds {
        min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Creates bounds from explicit corners.
    ///
    /// `min` must be componentwise less than or equal to `max` for a
    /// non-empty box; no ordering is enforced here.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Computes the bounds enclosing a set of points.
    ///
    /// Returns [`Bounds::EMPTY`] for an empty set.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        points.into_iter().fold(Self::EMPTY, |bounds, point| Self {
            min: Point3::from(bounds.min.coords.inf(&point.coords)),
            max: Point3::from(bounds.max.coords.sup(&point.coords)),
        })
    }

    /// Computes the bounds enclosing every vertex of a set of polygons.
    pub fn from_polygons<S: Clone>(polygons: &[Polygon<S>]) -> Self {
        polygons
            .iter()
            .fold(Self::EMPTY, |bounds, polygon| bounds.union(polygon.bounds()))
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// Returns `true` if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns the smallest bounds enclosing both boxes.
    pub fn union(&self, other: Bounds) -> Self {
        Self {
            min: Point3::from(self.min.coords.inf(&other.min.coords)),
            max: Point3::from(self.max.coords.sup(&other.max.coords)),
        }
    }

    /// Checks whether a point lies inside the box (boundary included).
    pub fn contains_point(&self, point: Point3<f64>) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
            && self.min.z <= point.z
            && point.z <= self.max.z
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}
