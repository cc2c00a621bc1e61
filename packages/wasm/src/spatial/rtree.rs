//! R-tree based hit testing using the rstar crate.
//!
//! Node circles are indexed by their centers. A query first collects every
//! center within the largest circle radius of the pointer, then keeps the
//! circles that actually contain it.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::tree::NodeKey;

/// A node circle in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeCircle {
    /// The node's arena key; higher keys are drawn later.
    pub key: NodeKey,
    /// Center X coordinate.
    pub x: f32,
    /// Center Y coordinate.
    pub y: f32,
    /// Circle radius.
    pub radius: f32,
}

impl NodeCircle {
    /// Create a new NodeCircle.
    pub fn new(key: NodeKey, x: f32, y: f32, radius: f32) -> Self {
        Self { key, x, y, radius }
    }

    fn contains(&self, x: f32, y: f32, scale: f32) -> bool {
        let radius = self.radius * scale;
        self.distance_2(&[x, y]) <= radius * radius
    }
}

impl RTreeObject for NodeCircle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodeCircle {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over rendered node circles.
pub struct SpatialIndex {
    tree: RTree<NodeCircle>,
    max_radius: f32,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            max_radius: 0.0,
        }
    }

    /// Replace the index contents.
    ///
    /// Bulk loading is faster than incremental inserts and the diagram is
    /// always rebuilt wholesale when a document loads.
    pub fn rebuild(&mut self, circles: Vec<NodeCircle>) {
        self.max_radius = circles.iter().map(|c| c.radius).fold(0.0, f32::max);
        self.tree = RTree::bulk_load(circles);
    }

    /// Find the node whose circle contains the point.
    ///
    /// Where circles overlap, the one drawn last (highest key) wins, matching
    /// what the user sees on top.
    pub fn hit(&self, x: f32, y: f32) -> Option<NodeKey> {
        self.hit_scaled(x, y, None)
    }

    /// Like [`hit`](Self::hit), with one circle drawn at `scale` times its
    /// radius (a hovered or pressed node).
    pub fn hit_scaled(&self, x: f32, y: f32, scaled: Option<(NodeKey, f32)>) -> Option<NodeKey> {
        if self.tree.size() == 0 {
            return None;
        }
        let growth = scaled.map_or(1.0, |(_, scale)| scale.max(1.0));
        let reach = self.max_radius * growth;
        self.tree
            .locate_within_distance([x, y], reach * reach)
            .filter(|circle| {
                let scale = match scaled {
                    Some((key, scale)) if key == circle.key => scale,
                    _ => 1.0,
                };
                circle.contains(x, y, scale)
            })
            .map(|circle| circle.key)
            .max()
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.max_radius = 0.0;
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(circles: &[(u32, f32, f32, f32)]) -> SpatialIndex {
        let mut index = SpatialIndex::new();
        index.rebuild(
            circles
                .iter()
                .map(|&(k, x, y, r)| NodeCircle::new(NodeKey(k), x, y, r))
                .collect(),
        );
        index
    }

    #[test]
    fn test_hit_inside_circle() {
        let index = index(&[(0, 300.0, 200.0, 30.0), (1, 450.0, 110.0, 20.0)]);
        assert_eq!(index.hit(300.0, 200.0), Some(NodeKey(0)));
        assert_eq!(index.hit(325.0, 200.0), Some(NodeKey(0)));
        assert_eq!(index.hit(455.0, 115.0), Some(NodeKey(1)));
    }

    #[test]
    fn test_miss_outside_every_circle() {
        let index = index(&[(0, 300.0, 200.0, 30.0), (1, 450.0, 110.0, 20.0)]);
        assert_eq!(index.hit(10.0, 10.0), None);
        // Within the root's reach but outside the small circle.
        assert_eq!(index.hit(450.0, 135.0), None);
    }

    #[test]
    fn test_overlap_prefers_top_most() {
        let index = index(&[(0, 0.0, 0.0, 30.0), (3, 20.0, 0.0, 20.0)]);
        assert_eq!(index.hit(15.0, 0.0), Some(NodeKey(3)));
        assert_eq!(index.hit(-15.0, 0.0), Some(NodeKey(0)));
    }

    #[test]
    fn test_scaled_circle_reaches_further() {
        let index = index(&[(0, 0.0, 0.0, 20.0), (1, 100.0, 0.0, 20.0)]);
        assert_eq!(index.hit(21.0, 0.0), None);
        assert_eq!(index.hit_scaled(21.0, 0.0, Some((NodeKey(0), 1.1))), Some(NodeKey(0)));
        // Only the scaled circle grows.
        assert_eq!(index.hit_scaled(121.0, 0.0, Some((NodeKey(0), 1.1))), None);
        // A shrunk circle stops short.
        assert_eq!(index.hit_scaled(19.5, 0.0, Some((NodeKey(0), 0.95))), None);
    }

    #[test]
    fn test_rebuild_and_clear() {
        let mut index = index(&[(0, 0.0, 0.0, 20.0)]);
        index.rebuild(vec![
            NodeCircle::new(NodeKey(1), 100.0, 100.0, 20.0),
            NodeCircle::new(NodeKey(2), 200.0, 200.0, 20.0),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.hit(0.0, 0.0), None);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.hit(100.0, 100.0), None);
    }
}
