//! Scene construction: turns a laid-out document into drawable shapes.
//!
//! Each node contributes, in draw order:
//! - an edge from its own position to its parent's (none for roots)
//! - a circle whose fill reflects the current selection
//! - a label below the circle, truncated to fit

use serde::Serialize;

use super::label::truncate_label;
use super::style::RenderStyle;
use crate::layout::RadialLayoutResult;
use crate::tree::{MindMapDocument, NodeKey};

/// Interaction state the renderer needs to know about.
///
/// Produced by the interaction manager; the renderer only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    pub selected: Option<NodeKey>,
    pub hovered: Option<NodeKey>,
    pub pressed: Option<NodeKey>,
}

/// Which of the two fills a node circle uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeFill {
    Selected,
    Default,
}

/// Line from a child (`x1`, `y1`) to its parent (`x2`, `y2`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleShape {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: NodeFill,
    /// Resolved color for `fill`.
    pub fill_color: String,
    /// Transient hover/press scale; 1.0 at rest.
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShape {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Everything drawn for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub key: NodeKey,
    pub id: String,
    pub level: u32,
    pub edge: Option<EdgeShape>,
    pub circle: CircleShape,
    pub label: LabelShape,
}

/// A drawable snapshot of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Nodes in draw order; later entries paint over earlier ones.
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// Build the scene for a laid-out document.
    ///
    /// Nodes missing from `layout` (a layout computed for another document)
    /// are skipped.
    pub fn build(
        doc: &MindMapDocument,
        layout: &RadialLayoutResult,
        highlight: &HighlightState,
        style: &RenderStyle,
    ) -> Self {
        let mut nodes = Vec::with_capacity(layout.node_count);

        for (key, node) in doc.walk() {
            let Some(pos) = layout.position(key) else {
                continue;
            };

            let edge = node
                .parent
                .and_then(|parent| layout.position(parent))
                .map(|parent_pos| EdgeShape {
                    x1: pos.x,
                    y1: pos.y,
                    x2: parent_pos.x,
                    y2: parent_pos.y,
                });

            let fill = if highlight.selected == Some(key) {
                NodeFill::Selected
            } else {
                NodeFill::Default
            };
            let fill_color = match fill {
                NodeFill::Selected => style.selected_fill.clone(),
                NodeFill::Default => style.default_fill.clone(),
            };

            // Press wins over hover while the button is held.
            let scale = if highlight.pressed == Some(key) {
                style.press_scale
            } else if highlight.hovered == Some(key) {
                style.hover_scale
            } else {
                1.0
            };

            nodes.push(SceneNode {
                key,
                id: node.id.clone(),
                level: node.level,
                edge,
                circle: CircleShape {
                    cx: pos.x,
                    cy: pos.y,
                    r: style.radius_for(node.level),
                    fill,
                    fill_color,
                    scale,
                },
                label: LabelShape {
                    x: pos.x,
                    y: pos.y + style.label_offset,
                    text: truncate_label(&node.text).into_owned(),
                },
            });
        }

        Self {
            width: style.viewport_width,
            height: style.viewport_height,
            nodes,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.edge.is_some()).count()
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.key == key)
    }
}
