//! BSP tree node implementation.

use crate::{Plane, Polygon};

/// A node in the BSP tree.
///
/// Each node partitions space with a splitting plane and stores the polygons
/// that are coplanar with that plane. Polygons in front of or behind the
/// plane live in the respective child subtrees.
///
/// # Coplanar Polygon Storage
///
/// Coplanar polygons are separated by their facing direction relative to
/// the splitting plane's normal:
/// - `coplanar_front`: polygons whose normal points the same direction as the plane normal
/// - `coplanar_back`: polygons whose normal points opposite to the plane normal
///
/// This distinction matters for CSG, where polygon facing determines
/// inside/outside classification.
#[derive(Debug, Clone)]
pub struct BspNode<S: Clone = ()> {
    /// The splitting plane for this node.
    plane: Plane,

    /// Polygons coplanar with the plane, facing the SAME direction as the plane normal.
    coplanar_front: Vec<Polygon<S>>,

    /// Polygons coplanar with the plane, facing the OPPOSITE direction as the plane normal.
    coplanar_back: Vec<Polygon<S>>,

    /// Subtree containing polygons in FRONT of the splitting plane.
    front: Option<Box<BspNode<S>>>,

    /// Subtree containing polygons BEHIND the splitting plane.
    back: Option<Box<BspNode<S>>>,
}

impl<S: Clone> BspNode<S> {
    /// Creates a new BSP node with the given splitting plane.
    ///
    /// The node starts with no coplanar polygons and no children.
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: None,
            back: None,
        }
    }

    /// Creates a new BSP node with a splitting plane and initial coplanar polygons.
    pub fn with_coplanar(
        plane: Plane,
        coplanar_front: Vec<Polygon<S>>,
        coplanar_back: Vec<Polygon<S>>,
    ) -> Self {
        Self {
            plane,
            coplanar_front,
            coplanar_back,
            front: None,
            back: None,
        }
    }

    /// Returns a reference to the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns coplanar polygons facing the same direction as the plane normal.
    #[inline]
    pub fn coplanar_front(&self) -> &[Polygon<S>] {
        &self.coplanar_front
    }

    /// Returns coplanar polygons facing opposite to the plane normal.
    #[inline]
    pub fn coplanar_back(&self) -> &[Polygon<S>] {
        &self.coplanar_back
    }

    /// Returns all coplanar polygons at this node (both front and back facing).
    pub fn all_coplanar(&self) -> impl Iterator<Item = &Polygon<S>> {
        self.coplanar_front.iter().chain(self.coplanar_back.iter())
    }

    /// Returns the number of coplanar polygons at this node.
    pub fn coplanar_count(&self) -> usize {
        self.coplanar_front.len() + self.coplanar_back.len()
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode<S>> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode<S>> {
        self.back.as_deref()
    }

    /// Sets the front child subtree.
    #[inline]
    pub fn set_front(&mut self, node: Option<BspNode<S>>) {
        self.front = node.map(Box::new);
    }

    /// Sets the back child subtree.
    #[inline]
    pub fn set_back(&mut self, node: Option<BspNode<S>>) {
        self.back = node.map(Box::new);
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree (including all descendants).
    pub fn polygon_count(&self) -> usize {
        let mut count = self.coplanar_count();

        if let Some(ref front) = self.front {
            count += front.polygon_count();
        }
        if let Some(ref back) = self.back {
            count += back.polygon_count();
        }

        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }

    /// Returns the subtree describing the complement of this subtree's solid.
    ///
    /// Splitting planes are flipped, the coplanar lists trade places (what
    /// faced along the old normal faces against the new one) and the child
    /// subtrees are swapped and inverted in turn. Stored polygon windings
    /// are left as they are; inversion only changes how the tree classifies
    /// space.
    pub fn inverted(&self) -> Self {
        Self {
            plane: self.plane.flipped(),
            coplanar_front: self.coplanar_back.clone(),
            coplanar_back: self.coplanar_front.clone(),
            front: self.back.as_ref().map(|n| Box::new(n.inverted())),
            back: self.front.as_ref().map(|n| Box::new(n.inverted())),
        }
    }
}

/// Determines if a polygon faces the same direction as a plane.
///
/// Compares the polygon's normal to the plane's normal using the dot product.
/// Returns `true` if the normals point in roughly the same direction (dot > 0).
#[inline]
pub fn faces_same_direction<S: Clone>(polygon: &Polygon<S>, plane: &Plane) -> bool {
    polygon.plane().normal().dot(&plane.normal()) > 0.0
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

    fn xz_plane() -> Plane {
        Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0).unwrap()
    }

    #[test]
    fn new_node_is_empty_leaf() {
        let node: BspNode = BspNode::new(xz_plane());

        assert!(node.is_leaf());
        assert_eq!(node.coplanar_count(), 0);
        assert_eq!(node.polygon_count(), 0);
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn with_coplanar_stores_polygons() {
        let poly1 = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let poly2 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

        let node = BspNode::with_coplanar(xz_plane(), vec![poly1], vec![poly2]);

        assert_eq!(node.coplanar_front().len(), 1);
        assert_eq!(node.coplanar_back().len(), 1);
        assert_eq!(node.coplanar_count(), 2);
    }

    #[test]
    fn set_children_updates_leaf_status() {
        let mut node: BspNode = BspNode::new(xz_plane());

        assert!(node.is_leaf());

        node.set_front(Some(BspNode::new(xz_plane())));
        assert!(!node.is_leaf());

        node.set_front(None);
        assert!(node.is_leaf());

        node.set_back(Some(BspNode::new(xz_plane())));
        assert!(!node.is_leaf());
    }

    #[test]
    fn depth_calculation() {
        let mut root: BspNode = BspNode::new(xz_plane());
        assert_eq!(root.depth(), 1);

        let mut front = BspNode::new(xz_plane());
        front.set_front(Some(BspNode::new(xz_plane())));
        root.set_front(Some(front));

        // root -> front -> front (depth 3)
        assert_eq!(root.depth(), 3);

        root.set_back(Some(BspNode::new(xz_plane())));
        // Still depth 3 (front branch is deeper)
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn polygon_count_recursive() {
        let poly = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

        let mut root = BspNode::with_coplanar(xz_plane(), vec![], vec![poly.clone()]);
        assert_eq!(root.polygon_count(), 1);

        let front = BspNode::with_coplanar(xz_plane(), vec![], vec![poly.clone(), poly.clone()]);
        let back = BspNode::with_coplanar(xz_plane(), vec![], vec![poly]);
        root.set_front(Some(front));
        root.set_back(Some(back));

        assert_eq!(root.polygon_count(), 4);
    }

    #[test]
    fn faces_same_direction_by_winding() {
        // Cross product of (1,0,0) x (0,0,1) = (0,-1,0): faces against +Y
        let down = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(!faces_same_direction(&down, &xz_plane()));

        // Cross product of (0,0,1) x (1,0,0) = (0,1,0): faces along +Y
        let up = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        assert!(faces_same_direction(&up, &xz_plane()));
    }

    #[test]
    fn inverted_swaps_lists_and_children() {
        let up = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let mut node = BspNode::with_coplanar(xz_plane(), vec![up.clone()], vec![]);
        node.set_front(Some(BspNode::new(xz_plane())));

        let inverted = node.inverted();
        approx::assert_relative_eq!(inverted.plane().normal(), Vector3::new(0.0, -1.0, 0.0));
        assert!(inverted.coplanar_front().is_empty());
        assert_eq!(inverted.coplanar_back(), &[up]);
        assert!(inverted.front().is_none());
        assert!(inverted.back().is_some());
    }
}
