//! Constructive solid geometry over sets of convex planar polygons.
//!
//! A solid is represented only by its boundary: a collection of convex,
//! coplanar-vertex [`Polygon`]s wound counter-clockwise around outward
//! normals. The Boolean operations ([`union`], [`subtract`],
//! [`intersection`], [`xor`]) compile each operand into a [`BspTree`] and
//! clip the other operand's polygons against it. Zero-thickness inputs
//! (coplanar polygon sets) are supported; coincident boundary material is
//! resolved face by face so that, for example, the symmetric difference of
//! a shape with itself is empty.
//!
//! All operations return new polygon sets and never mutate their inputs.
//! Results are deterministic for a given input order.

mod bounds;
mod error;
mod ops;
mod plane;
mod polygon;

pub mod bsp;

pub use bounds::Bounds;
pub use bsp::{BspNode, BspTree, ClipRule, FirstPolygon, PlaneSelector};
pub use error::GeometryError;
pub use ops::{intersection, subtract, union, xor};
pub use plane::{Classification, EPSILON, Plane, PlaneSide};
pub use polygon::Polygon;
