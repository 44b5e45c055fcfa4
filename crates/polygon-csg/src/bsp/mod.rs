//! Binary Space Partitioning trees over convex planar polygons.
//!
//! The tree recursively partitions 3D space using planes derived from the
//! input polygons. Built from the boundary of a solid, it answers the one
//! question CSG needs: which parts of a foreign polygon lie inside, outside
//! or on that solid. See [`BspTree::clip_polygons`].
//!
//! # Architecture
//!
//! - [`BspTree`]: the container holding the root node, with build, invert
//!   and clip operations
//! - [`BspNode`]: internal nodes storing a splitting plane and coplanar
//!   polygons
//! - [`PlaneSelector`]: strategy trait for choosing splitting planes
//! - [`ClipRule`]: which side of the solid survives a clip

mod node;
mod selector;
mod tree;

pub use node::{BspNode, faces_same_direction};
pub use selector::{FirstPolygon, PlaneSelector};
pub use tree::{BspTree, ClipRule, MAX_TREE_DEPTH};
