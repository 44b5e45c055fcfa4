//! Boolean operations over sets of convex planar polygons.
//!
//! Each operation treats its operands as the boundary of a solid (or, for
//! coplanar polygon sets, as a zero-thickness region) and returns a new
//! polygon set; the inputs are never mutated. Fragments inherit the tag of
//! the polygon they were cut from.

use crate::bsp::{BspTree, ClipRule};
use crate::polygon::Polygon;

/// Computes the union of two polygon sets.
///
/// Keeps the parts of `a` outside `b` and the parts of `b` outside `a`.
/// Boundary material the sets share is contributed by `b` only, so
/// coincident faces appear once in the result.
pub fn union<S: Clone>(a: &[Polygon<S>], b: &[Polygon<S>]) -> Vec<Polygon<S>> {
    let mut kept =
        BspTree::from_polygons(b.to_vec()).clip_polygons(a.to_vec(), ClipRule::GreaterThan);
    kept.extend(
        BspTree::from_polygons(a.to_vec()).clip_polygons(b.to_vec(), ClipRule::GreaterThanEqual),
    );
    kept
}

/// Computes the difference `a - b`.
///
/// Keeps the parts of `a` outside `b`, plus the parts of `b` inside `a`
/// with their winding reversed: those bound the cavity carved out of `a`.
pub fn subtract<S: Clone>(a: &[Polygon<S>], b: &[Polygon<S>]) -> Vec<Polygon<S>> {
    if a.is_empty() || b.is_empty() {
        return a.to_vec();
    }

    let mut kept =
        BspTree::from_polygons(b.to_vec()).clip_polygons(a.to_vec(), ClipRule::GreaterThan);
    let cavity =
        BspTree::from_polygons(a.to_vec()).clip_polygons(b.to_vec(), ClipRule::LessThan);
    kept.extend(cavity.iter().map(Polygon::flipped));
    kept
}

/// Computes the intersection of two polygon sets.
///
/// What remains of `a` after removing everything outside `b`, expressed as
/// the double difference `a - (a - b)`.
pub fn intersection<S: Clone>(a: &[Polygon<S>], b: &[Polygon<S>]) -> Vec<Polygon<S>> {
    subtract(a, &subtract(a, b))
}

/// Computes the symmetric difference of two polygon sets.
///
/// Material in exactly one of the two: `(a - b) ∪ (b - a)`. The symmetric
/// difference of a set with itself is empty.
pub fn xor<S: Clone>(a: &[Polygon<S>], b: &[Polygon<S>]) -> Vec<Polygon<S>> {
    union(&subtract(a, b), &subtract(b, a))
}
