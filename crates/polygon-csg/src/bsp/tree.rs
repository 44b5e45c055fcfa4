//! BSP tree container, construction and clipping.

use crate::{Classification, Polygon};

use super::node::{BspNode, faces_same_direction};
use super::selector::{FirstPolygon, PlaneSelector};

/// Maximum build recursion depth before construction is considered runaway.
///
/// Every level consumes at least the coplanar polygons of its splitting
/// plane, so well-formed input stays far below this. The guard exists to
/// fail fast in debug builds when epsilon noise keeps re-splitting
/// near-degenerate fragments.
pub const MAX_TREE_DEPTH: usize = 4096;

/// How [`BspTree::clip_polygons`] compares clipped material against the
/// solid the tree describes.
///
/// The rule names the signed distance of kept material from the solid's
/// boundary: the `GreaterThan` variants keep what lies outside the solid,
/// the `LessThan` variants keep what lies inside. The `Equal` variants
/// additionally keep material lying on the boundary itself, which is how
/// the Boolean operations control whether coincident faces survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRule {
    /// Keep material strictly outside the solid.
    GreaterThan,
    /// Keep material outside the solid or on its boundary.
    GreaterThanEqual,
    /// Keep material strictly inside the solid.
    LessThan,
    /// Keep material inside the solid or on its boundary.
    LessThanEqual,
}

impl ClipRule {
    /// Whether front material survives at a missing front child.
    /// When `false`, back material survives at a missing back child instead.
    fn keeps_front(self) -> bool {
        matches!(self, ClipRule::GreaterThan | ClipRule::GreaterThanEqual)
    }

    /// Whether a coplanar polygon facing along the node normal is routed
    /// whole to the front, bypassing the per-face boundary clip.
    fn routes_same_facing_front(self) -> bool {
        matches!(self, ClipRule::GreaterThanEqual | ClipRule::LessThan)
    }
}

/// A Binary Space Partitioning tree over convex planar polygons.
///
/// The tree recursively partitions space with planes taken from the input
/// polygons. Polygons coplanar with a splitting plane are stored at that
/// node; the rest are routed (splitting them when they span the plane) into
/// the front and back subtrees. A tree built from the boundary of a solid
/// can then classify foreign polygons as inside or outside that solid,
/// which is the primitive the Boolean operations in [`crate::ops`] are
/// assembled from.
///
/// # Construction
///
/// Trees are built from a collection of polygons using a [`PlaneSelector`]
/// to choose splitting planes:
///
/// ```
/// use polygon_csg::{BspTree, FirstPolygon, Polygon};
/// use nalgebra::Point3;
///
/// let triangle: Polygon = Polygon::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ])?;
/// let tree = BspTree::build(vec![triangle], &FirstPolygon);
/// assert_eq!(tree.polygon_count(), 1);
/// # Ok::<(), polygon_csg::GeometryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree<S: Clone = ()> {
    root: Option<BspNode<S>>,
}

impl<S: Clone> BspTree<S> {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a BSP tree from a collection of polygons.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes during
    /// construction. Polygons that span a splitting plane are split; all
    /// lists preserve the relative input order, so construction is fully
    /// deterministic.
    ///
    /// Returns an empty tree if the input is empty.
    pub fn build<Sel: PlaneSelector>(polygons: Vec<Polygon<S>>, selector: &Sel) -> Self {
        Self {
            root: build_node(polygons, selector, 0),
        }
    }

    /// Builds a BSP tree using the default plane selector ([`FirstPolygon`]).
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        Self::build(polygons, &FirstPolygon)
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode<S>> {
        self.root.as_ref()
    }

    /// Returns the total number of polygons in the tree.
    pub fn polygon_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.polygon_count())
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Collects all polygons in the tree into a vector, front subtrees
    /// before coplanar polygons before back subtrees.
    pub fn collect_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::with_capacity(self.polygon_count());
        collect_polygons_recursive(self.root.as_ref(), &mut result);
        result
    }

    /// Returns a tree describing the complement of this tree's solid.
    ///
    /// The original tree is left untouched. See [`BspNode::inverted`] for
    /// what inversion does to each node.
    pub fn inverted(&self) -> Self {
        Self {
            root: self.root.as_ref().map(|n| n.inverted()),
        }
    }

    /// Clips foreign polygons against the solid this tree describes.
    ///
    /// Each input polygon is pushed down the tree, split wherever it spans
    /// a node plane. Fragments reaching empty space are kept or dropped
    /// according to the [`ClipRule`]: outside fragments survive under the
    /// `GreaterThan` rules, inside fragments under the `LessThan` rules.
    ///
    /// A polygon coplanar with a node plane is resolved against the faces
    /// stored at that node: the parts they cover are boundary material, the
    /// parts they don't are treated as outside. Under the rules that keep
    /// the boundary (`GreaterThanEqual`, and `LessThan` by symmetry) a
    /// same-facing coplanar polygon short-circuits to the outside route.
    ///
    /// An empty tree returns the input unchanged.
    pub fn clip_polygons(&self, polygons: Vec<Polygon<S>>, rule: ClipRule) -> Vec<Polygon<S>> {
        let Some(root) = self.root.as_ref() else {
            return polygons;
        };

        let keep_front = rule.keeps_front();
        let mut kept = Vec::new();
        let mut pending = vec![(root, polygons)];

        while let Some((node, polygons)) = pending.pop() {
            let mut front_list = Vec::new();
            let mut back_list = Vec::new();

            for polygon in polygons {
                match polygon.classify(node.plane()) {
                    Classification::Front => front_list.push(polygon),
                    Classification::Back => back_list.push(polygon),
                    Classification::Coplanar => {
                        if rule.routes_same_facing_front()
                            && faces_same_direction(&polygon, node.plane())
                        {
                            front_list.push(polygon);
                        } else {
                            let (outside, covered) = polygon.clip_to_faces(node.all_coplanar());
                            front_list.extend(outside);
                            back_list.extend(covered);
                        }
                    }
                    Classification::Spanning => {
                        let (front_part, back_part) = node.plane().split_polygon(&polygon);
                        front_list.extend(front_part);
                        back_list.extend(back_part);
                    }
                }
            }

            match node.front() {
                Some(child) if !front_list.is_empty() => pending.push((child, front_list)),
                None if keep_front => kept.extend(front_list),
                _ => {}
            }
            match node.back() {
                Some(child) if !back_list.is_empty() => pending.push((child, back_list)),
                None if !keep_front => kept.extend(back_list),
                _ => {}
            }
        }

        kept
    }
}

/// Recursively builds a BSP node from a list of polygons.
fn build_node<S: Clone, Sel: PlaneSelector>(
    polygons: Vec<Polygon<S>>,
    selector: &Sel,
    depth: usize,
) -> Option<BspNode<S>> {
    debug_assert!(
        depth < MAX_TREE_DEPTH,
        "BSP construction exceeded maximum depth"
    );

    let plane = *selector.select(&polygons)?.plane();

    let mut coplanar_front = Vec::new();
    let mut coplanar_back = Vec::new();
    let mut front_list = Vec::new();
    let mut back_list = Vec::new();

    // The selected polygon stays in the list; it classifies as coplanar
    // with its own plane and lands in a coplanar list below. Not removing
    // it keeps the relative input order intact everywhere.
    for polygon in polygons {
        match polygon.classify(&plane) {
            Classification::Front => {
                front_list.push(polygon);
            }
            Classification::Back => {
                back_list.push(polygon);
            }
            Classification::Coplanar => {
                if faces_same_direction(&polygon, &plane) {
                    coplanar_front.push(polygon);
                } else {
                    coplanar_back.push(polygon);
                }
            }
            Classification::Spanning => {
                let (front_part, back_part) = plane.split_polygon(&polygon);
                if let Some(f) = front_part {
                    front_list.push(f);
                }
                if let Some(b) = back_part {
                    back_list.push(b);
                }
            }
        }
    }

    let mut node = BspNode::with_coplanar(plane, coplanar_front, coplanar_back);
    node.set_front(build_node(front_list, selector, depth + 1));
    node.set_back(build_node(back_list, selector, depth + 1));

    Some(node)
}

/// Recursively collects all polygons from a node subtree.
fn collect_polygons_recursive<S: Clone>(node: Option<&BspNode<S>>, result: &mut Vec<Polygon<S>>) {
    if let Some(n) = node {
        collect_polygons_recursive(n.front(), result);
        result.extend(n.all_coplanar().cloned());
        collect_polygons_recursive(n.back(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn make_triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Polygon {
        Polygon::new(vec![
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        ])
        .unwrap()
    }

    fn make_square(half: f64) -> Polygon {
        Polygon::new(vec![
            Point3::new(-half, -half, 0.0),
            Point3::new(half, -half, 0.0),
            Point3::new(half, half, 0.0),
            Point3::new(-half, half, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn empty_tree() {
        let tree: BspTree = BspTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn build_empty() {
        let tree: BspTree = BspTree::from_polygons(vec![]);
        assert!(tree.is_empty());
    }

    #[test]
    fn build_single_polygon() {
        let poly = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let tree = BspTree::from_polygons(vec![poly]);

        assert!(!tree.is_empty());
        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn build_two_parallel_polygons() {
        // Two triangles on parallel planes (not coplanar)
        let poly1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let poly2 = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);

        let tree = BspTree::from_polygons(vec![poly1, poly2]);

        assert_eq!(tree.polygon_count(), 2);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn build_coplanar_preserves_order() {
        // Two triangles on the same plane, same winding
        let poly1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let poly2 = make_triangle([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 1.0, 0.0]);

        let tree = BspTree::from_polygons(vec![poly1.clone(), poly2.clone()]);

        // Both coplanar, stored in one node in input order
        assert_eq!(tree.depth(), 1);
        let root = tree.root().unwrap();
        assert_eq!(root.coplanar_front(), &[poly1, poly2]);
    }

    #[test]
    fn build_spanning_polygon_gets_split() {
        // First polygon on Y=0 plane
        let splitter = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

        // Second polygon spans the Y=0 plane
        let spanning = make_triangle([-0.5, -1.0, 0.5], [0.5, 1.0, 0.5], [0.5, -1.0, 0.5]);

        let tree = BspTree::from_polygons(vec![splitter, spanning]);

        // Original was 2 polygons, but spanning got split into 2
        // So we should have 3 total
        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.collect_polygons().len(), 3);
    }

    #[test]
    fn clip_against_empty_tree_returns_input() {
        let tree: BspTree = BspTree::new();
        let square = make_square(0.5);
        let result = tree.clip_polygons(vec![square.clone()], ClipRule::GreaterThan);
        assert_eq!(result, vec![square]);
    }

    #[test]
    fn clip_rules_on_own_boundary() {
        let square = make_square(0.5);
        let tree = BspTree::from_polygons(vec![square.clone()]);

        // The square lies entirely on the solid's boundary: only the rules
        // that include the boundary keep it.
        let gt = tree.clip_polygons(vec![square.clone()], ClipRule::GreaterThan);
        assert!(gt.is_empty());

        let ge = tree.clip_polygons(vec![square.clone()], ClipRule::GreaterThanEqual);
        assert_eq!(ge, vec![square.clone()]);

        let lt = tree.clip_polygons(vec![square.clone()], ClipRule::LessThan);
        assert!(lt.is_empty());

        let le = tree.clip_polygons(vec![square.clone()], ClipRule::LessThanEqual);
        assert_eq!(le, vec![square]);
    }

    #[test]
    fn clip_separates_front_and_back() {
        let sheet = make_square(1.0);
        let tree = BspTree::from_polygons(vec![sheet]);

        let above = make_square(0.5).translated(Vector3::new(0.0, 0.0, 1.0));
        let below = make_square(0.5).translated(Vector3::new(0.0, 0.0, -1.0));

        let outside = tree.clip_polygons(
            vec![above.clone(), below.clone()],
            ClipRule::GreaterThan,
        );
        assert_eq!(outside, vec![above.clone()]);

        let inside = tree.clip_polygons(vec![above.clone(), below.clone()], ClipRule::LessThan);
        assert_eq!(inside, vec![below.clone()]);

        // Inversion exchanges the two half-spaces
        let inverted = tree.inverted();
        let outside = inverted.clip_polygons(vec![above, below.clone()], ClipRule::GreaterThan);
        assert_eq!(outside, vec![below]);
    }

    #[test]
    fn clip_splits_spanning_input() {
        let sheet = make_square(1.0);
        let tree = BspTree::from_polygons(vec![sheet]);

        // Vertical square crossing the sheet's plane
        let crossing: Polygon = Polygon::new(vec![
            Point3::new(-0.5, 0.0, -0.5),
            Point3::new(0.5, 0.0, -0.5),
            Point3::new(0.5, 0.0, 0.5),
            Point3::new(-0.5, 0.0, 0.5),
        ])
        .unwrap();

        let kept = tree.clip_polygons(vec![crossing], ClipRule::GreaterThan);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].bounds().min().z >= 0.0);
        assert!(kept[0].bounds().max().z > 0.0);
    }

    #[test]
    fn clip_coplanar_overlap_against_stored_faces() {
        let square = make_square(0.5);
        let tree = BspTree::from_polygons(vec![square.clone()]);

        let shifted = square.translated(Vector3::new(0.5, 0.0, 0.0));

        // GreaterThan: only the uncovered part (x in [0.5, 1.0]) survives
        let kept = tree.clip_polygons(vec![shifted.clone()], ClipRule::GreaterThan);
        assert_eq!(kept.len(), 1);
        approx::assert_relative_eq!(kept[0].bounds().min(), Point3::new(0.5, -0.5, 0.0));
        approx::assert_relative_eq!(kept[0].bounds().max(), Point3::new(1.0, 0.5, 0.0));

        // LessThanEqual: only the covered part (x in [0.0, 0.5]) survives
        let kept = tree.clip_polygons(vec![shifted], ClipRule::LessThanEqual);
        assert_eq!(kept.len(), 1);
        approx::assert_relative_eq!(kept[0].bounds().min(), Point3::new(0.0, -0.5, 0.0));
        approx::assert_relative_eq!(kept[0].bounds().max(), Point3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn inverted_leaves_original_untouched() {
        let square = make_square(0.5);
        let tree = BspTree::from_polygons(vec![square.clone()]);
        let inverted = tree.inverted();

        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(inverted.polygon_count(), 1);
        assert_eq!(tree.root().unwrap().coplanar_front(), &[square.clone()]);
        assert_eq!(inverted.root().unwrap().coplanar_back(), &[square]);
    }
}
