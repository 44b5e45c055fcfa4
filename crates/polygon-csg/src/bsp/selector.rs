//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! polygon splits during construction. Different strategies offer different
//! trade-offs between build time and tree quality.

use crate::Polygon;

/// Strategy for selecting which polygon's plane to use for splitting.
///
/// The selected polygon's plane becomes the splitting plane for a BSP node.
/// Different strategies can optimize for:
/// - Build speed (simple selection)
/// - Tree balance (minimize depth)
/// - Minimal splits (preserve original polygons)
pub trait PlaneSelector {
    /// Select a polygon from the slice to use as the splitting plane.
    ///
    /// Returns `None` if the slice is empty.
    /// The returned reference must be to an element in the provided slice.
    fn select<'a, S: Clone>(&self, polygons: &'a [Polygon<S>]) -> Option<&'a Polygon<S>>;
}

/// Selects the first polygon in the list.
///
/// This is the simplest and fastest selector, and keeps construction
/// deterministic in input order. It may produce unbalanced trees depending
/// on that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select<'a, S: Clone>(&self, polygons: &'a [Polygon<S>]) -> Option<&'a Polygon<S>> {
        polygons.first()
    }
}
