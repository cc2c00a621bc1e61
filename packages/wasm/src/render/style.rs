//! Visual constants for the renderer.

use serde::{Deserialize, Serialize};

/// Sizes, colors, and interaction scales used when building a scene.
///
/// Colors are passed through verbatim, so CSS custom properties such as
/// `hsl(var(--primary))` keep theming with the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    /// Width of the SVG view box.
    pub viewport_width: f32,
    /// Height of the SVG view box.
    pub viewport_height: f32,
    /// Circle radius for level-0 nodes.
    pub root_radius: f32,
    /// Circle radius for every other node.
    pub node_radius: f32,
    /// Vertical distance from a node's center down to its label.
    pub label_offset: f32,
    pub selected_fill: String,
    pub default_fill: String,
    pub node_stroke: String,
    pub node_stroke_width: f32,
    pub edge_stroke: String,
    pub edge_stroke_width: f32,
    pub edge_opacity: f32,
    /// Circle scale while the pointer is over a node.
    pub hover_scale: f32,
    /// Circle scale while a node is pressed.
    pub press_scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            viewport_width: 600.0,
            viewport_height: 400.0,
            root_radius: 30.0,
            node_radius: 20.0,
            label_offset: 50.0,
            selected_fill: "hsl(var(--primary))".to_string(),
            default_fill: "hsl(var(--accent))".to_string(),
            node_stroke: "hsl(var(--primary))".to_string(),
            node_stroke_width: 2.0,
            edge_stroke: "hsl(var(--primary))".to_string(),
            edge_stroke_width: 2.0,
            edge_opacity: 0.6,
            hover_scale: 1.1,
            press_scale: 0.95,
        }
    }
}

impl RenderStyle {
    /// Circle radius for a node at `level`.
    #[inline]
    pub fn radius_for(&self, level: u32) -> f32 {
        if level == 0 {
            self.root_radius
        } else {
            self.node_radius
        }
    }
}
