//! Radial fan-out layout for mind maps.
//!
//! Roots are pinned at the diagram center. Every other node sits on a ring
//! whose radius grows with its level, at an angle fanned out around its
//! parent's angle:
//!
//! ```text
//! radius(level) = base_radius + level * ring_spacing
//! angle         = center_angle
//!               + (sibling_index - (sibling_count - 1) / 2)
//!                 * (angular_span / max(sibling_count, min_slot_divisor))
//! ```
//!
//! The divisor floor keeps a node with one or two children from spreading
//! them across a half-circle into neighbouring branches.
//!
//! Each child uses its parent's resolved angle as its own center angle, so
//! branches keep fanning outward instead of re-centering on the origin.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::tree::{MindMapDocument, NodeKey};

/// Configuration for the radial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialConfig {
    /// X coordinate every root is pinned to.
    pub center_x: f32,
    /// Y coordinate every root is pinned to.
    pub center_y: f32,
    /// Radius of the ring at level 0; level 1 sits one spacing further out.
    pub base_radius: f32,
    /// Distance between consecutive rings.
    pub ring_spacing: f32,
    /// Arc shared out between siblings before the divisor floor applies.
    pub angular_span: f32,
    /// Floor on the slot divisor.
    pub min_slot_divisor: u32,
    /// Angle the first root fans its children around.
    pub start_angle: f32,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            center_x: 300.0,
            center_y: 200.0,
            base_radius: 100.0,
            ring_spacing: 80.0,
            angular_span: PI,
            min_slot_divisor: 3,
            start_angle: 0.0,
        }
    }
}

impl RadialConfig {
    /// Radius of the ring holding nodes at `level`.
    #[inline]
    pub fn ring_radius(&self, level: u32) -> f32 {
        self.base_radius + level as f32 * self.ring_spacing
    }

    /// Angle of one sibling's slot around `center_angle`.
    #[inline]
    pub fn slot_angle(
        &self,
        center_angle: f32,
        angular_span: f32,
        sibling_index: u32,
        sibling_count: u32,
    ) -> f32 {
        let count = sibling_count.max(1);
        let offset = sibling_index as f32 - (count - 1) as f32 / 2.0;
        let divisor = count.max(self.min_slot_divisor).max(1) as f32;
        center_angle + offset * (angular_span / divisor)
    }
}

/// A 2D point in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Where a node lands, plus the angle its children fan out around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Position,
    pub angle: f32,
}

/// Place a single node.
///
/// Level-0 nodes ignore radius and angle and land on the center point; their
/// resolved angle is still returned because their children fan around it.
pub fn place_node(
    config: &RadialConfig,
    level: u32,
    center_angle: f32,
    angular_span: f32,
    sibling_index: u32,
    sibling_count: u32,
) -> Placement {
    let angle = config.slot_angle(center_angle, angular_span, sibling_index, sibling_count);

    let position = if level == 0 {
        Position {
            x: config.center_x,
            y: config.center_y,
        }
    } else {
        let radius = config.ring_radius(level);
        Position {
            x: config.center_x + angle.cos() * radius,
            y: config.center_y + angle.sin() * radius,
        }
    };

    Placement { position, angle }
}

/// Result of the radial layout computation.
///
/// Buffers are indexed by [`NodeKey`] (arena order).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadialLayoutResult {
    /// X positions, one per node.
    pub positions_x: Vec<f32>,
    /// Y positions, one per node.
    pub positions_y: Vec<f32>,
    /// Resolved angle of each node.
    pub angles: Vec<f32>,
    /// Level of each node.
    pub levels: Vec<u32>,
    /// Number of nodes laid out.
    pub node_count: usize,
}

impl RadialLayoutResult {
    pub fn position(&self, key: NodeKey) -> Option<Position> {
        let i = key.index();
        Some(Position {
            x: *self.positions_x.get(i)?,
            y: *self.positions_y.get(i)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

/// The radial layout engine.
#[derive(Debug, Clone, Default)]
pub struct RadialLayout {
    config: RadialConfig,
}

impl RadialLayout {
    /// Create a new radial layout with the given configuration.
    pub fn new(config: RadialConfig) -> Self {
        Self { config }
    }

    /// Create a radial layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RadialConfig::default())
    }

    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    /// Lay out every node of the document.
    ///
    /// The arena is in pre-order, so each parent's angle is resolved before
    /// any of its children are visited and one forward sweep suffices.
    /// Roots are placed as the only sibling (count 1) at their root index.
    pub fn compute(&self, doc: &MindMapDocument) -> RadialLayoutResult {
        let node_count = doc.count_nodes();
        let mut positions_x = Vec::with_capacity(node_count);
        let mut positions_y = Vec::with_capacity(node_count);
        let mut angles: Vec<f32> = Vec::with_capacity(node_count);
        let mut levels = Vec::with_capacity(node_count);

        for (_, node) in doc.walk() {
            let (center_angle, sibling_count) = match node.parent {
                Some(parent) => (angles[parent.index()], node.sibling_count),
                None => (self.config.start_angle, 1),
            };

            let placement = place_node(
                &self.config,
                node.level,
                center_angle,
                self.config.angular_span,
                node.sibling_index,
                sibling_count,
            );

            positions_x.push(placement.position.x);
            positions_y.push(placement.position.y);
            angles.push(placement.angle);
            levels.push(node.level);
        }

        RadialLayoutResult {
            positions_x,
            positions_y,
            angles,
            levels,
            node_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MindMapNode;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < 0.01,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ring_radius_increases() {
        let config = RadialConfig::default();
        assert_close(config.ring_radius(1), 180.0, "level 1");
        assert_close(config.ring_radius(2), 260.0, "level 2");
        for level in 0..32 {
            assert!(config.ring_radius(level + 1) > config.ring_radius(level));
        }
    }

    #[test]
    fn test_slot_angle_divisor_floor() {
        let config = RadialConfig::default();
        // Two siblings share thirds of pi, not halves.
        assert_close(config.slot_angle(0.0, PI, 0, 2), -PI / 6.0, "first of two");
        assert_close(config.slot_angle(0.0, PI, 1, 2), PI / 6.0, "second of two");
        // A single child stays on its parent's angle.
        assert_close(config.slot_angle(1.0, PI, 0, 1), 1.0, "only child");
        // Above the floor the span is divided by the sibling count.
        assert_close(config.slot_angle(0.0, PI, 0, 4), -1.5 * PI / 4.0, "first of four");
    }

    #[test]
    fn test_root_pinned_to_center() {
        let config = RadialConfig::default();
        let placement = place_node(&config, 0, 2.5, PI, 3, 7);
        assert_eq!(placement.position, Position { x: 300.0, y: 200.0 });
    }

    #[test]
    fn test_sample_positions() {
        let doc = MindMapDocument::sample();
        let result = RadialLayout::with_defaults().compute(&doc);
        assert_eq!(result.node_count, 6);

        let pos = |id: &str| result.position(doc.key_of(id).unwrap()).unwrap();

        let root = pos("root");
        assert_close(root.x, 300.0, "root x");
        assert_close(root.y, 200.0, "root y");

        let branch1 = pos("1");
        assert_close(branch1.x, 300.0 + 180.0 * (-PI / 6.0).cos(), "branch 1 x");
        assert_close(branch1.y, 110.0, "branch 1 y");

        let branch2 = pos("2");
        assert_close(branch2.x, 300.0 + 180.0 * (PI / 6.0).cos(), "branch 2 x");
        assert_close(branch2.y, 290.0, "branch 2 y");

        let leaf_a = pos("1.1");
        assert_close(leaf_a.x, 430.0, "leaf A x");
        assert_close(leaf_a.y, 200.0 - 260.0 * (PI / 3.0).sin(), "leaf A y");

        // Only child inherits its parent's angle.
        let leaf_c = pos("2.1");
        assert_close(leaf_c.x, 300.0 + 260.0 * (PI / 6.0).cos(), "leaf C x");
        assert_close(leaf_c.y, 330.0, "leaf C y");
    }

    #[test]
    fn test_deterministic() {
        let doc = MindMapDocument::sample();
        let layout = RadialLayout::with_defaults();
        assert_eq!(layout.compute(&doc), layout.compute(&doc));
    }

    #[test]
    fn test_every_node_on_its_ring() {
        let doc = MindMapDocument::sample();
        let result = RadialLayout::with_defaults().compute(&doc);
        let config = RadialConfig::default();

        for (key, node) in doc.walk() {
            let p = result.position(key).unwrap();
            let dist = ((p.x - 300.0).powi(2) + (p.y - 200.0).powi(2)).sqrt();
            let expected = if node.level == 0 { 0.0 } else { config.ring_radius(node.level) };
            assert_close(dist, expected, &node.id);
        }
    }

    #[test]
    fn test_multiple_roots_all_centered() {
        let doc = MindMapDocument::new(
            "two",
            vec![
                MindMapNode::branch("a", "A", vec![MindMapNode::leaf("a1", "A1")]),
                MindMapNode::branch("b", "B", vec![MindMapNode::leaf("b1", "B1")]),
            ],
        )
        .unwrap();
        let result = RadialLayout::with_defaults().compute(&doc);

        for id in ["a", "b"] {
            let p = result.position(doc.key_of(id).unwrap()).unwrap();
            assert_eq!(p, Position { x: 300.0, y: 200.0 });
        }

        // Root i fans its children around i * pi / 3.
        let b1 = doc.key_of("b1").unwrap();
        assert_close(result.angles[b1.index()], PI / 3.0, "second root's child angle");
    }

    #[test]
    fn test_single_root_without_children() {
        let doc = MindMapDocument::new("solo", vec![MindMapNode::leaf("r", "Root")]).unwrap();
        let result = RadialLayout::with_defaults().compute(&doc);
        assert_eq!(result.node_count, 1);
        assert_eq!(result.position(NodeKey(0)), Some(Position { x: 300.0, y: 200.0 }));
    }

    #[test]
    fn test_empty_document() {
        let doc = MindMapDocument::empty("blank");
        let result = RadialLayout::with_defaults().compute(&doc);
        assert!(result.is_empty());
        assert!(result.positions_x.is_empty());
        assert_eq!(result.position(NodeKey(0)), None);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: RadialConfig = serde_json::from_str(r#"{"ringSpacing": 50}"#).unwrap();
        assert_eq!(config.ring_spacing, 50.0);
        assert_eq!(config.base_radius, 100.0);
        assert_eq!(config.min_slot_divisor, 3);
    }
}
