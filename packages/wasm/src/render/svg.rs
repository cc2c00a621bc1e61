//! Standalone SVG export of a [`Scene`].
//!
//! Each node becomes one `<g>` holding its edge, circle, and label, written in
//! draw order so children paint over their parents. Interaction scales are
//! not exported; the file shows the diagram at rest with its selection.

use std::fmt::Write as _;

use super::scene::Scene;
use super::style::RenderStyle;

/// Render `scene` as an SVG document.
pub fn to_svg(scene: &Scene, title: &str, style: &RenderStyle) -> String {
    let mut out = String::with_capacity(256 + scene.nodes.len() * 320);

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="600" viewBox="0 0 {} {}">"#,
        scene.width, scene.height
    );
    let _ = write!(out, "<title>{}</title>", escape(title));

    for node in &scene.nodes {
        let _ = write!(out, r#"<g data-node-id="{}">"#, escape(&node.id));

        if let Some(edge) = node.edge {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}"/>"#,
                edge.x1,
                edge.y1,
                edge.x2,
                edge.y2,
                escape(&style.edge_stroke),
                style.edge_stroke_width,
                style.edge_opacity
            );
        }

        let circle = &node.circle;
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            circle.cx,
            circle.cy,
            circle.r,
            escape(&circle.fill_color),
            escape(&style.node_stroke),
            style.node_stroke_width
        );

        let label = &node.label;
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            label.x,
            label.y,
            escape(&label.text)
        );

        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

/// Escape text for XML content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RadialLayout;
    use crate::render::HighlightState;
    use crate::tree::{MindMapDocument, MindMapNode};

    fn render(doc: &MindMapDocument, highlight: HighlightState) -> String {
        let style = RenderStyle::default();
        let layout = RadialLayout::with_defaults().compute(doc);
        let scene = Scene::build(doc, &layout, &highlight, &style);
        to_svg(&scene, doc.title(), &style)
    }

    #[test]
    fn test_sample_svg_shapes() {
        let doc = MindMapDocument::sample();
        let svg = render(&doc, HighlightState::default());

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 600 400""#));
        assert!(svg.contains("<title>Sample Mind Map</title>"));
        assert_eq!(svg.matches("<circle ").count(), 6);
        assert_eq!(svg.matches("<line ").count(), 5);
        assert_eq!(svg.matches("<text ").count(), 6);
        assert!(svg.contains(">Central Topic</text>"));
    }

    #[test]
    fn test_selected_node_uses_selected_fill() {
        let doc = MindMapDocument::sample();
        let svg = render(
            &doc,
            HighlightState {
                selected: doc.key_of("1.1"),
                ..Default::default()
            },
        );
        assert_eq!(svg.matches(r#"fill="hsl(var(--primary))""#).count(), 1);
        assert_eq!(svg.matches(r#"fill="hsl(var(--accent))""#).count(), 5);
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = MindMapDocument::new(
            "R&D <notes>",
            vec![MindMapNode::leaf("a\"b", "Fish & Chips")],
        )
        .unwrap();
        let svg = render(&doc, HighlightState::default());
        assert!(svg.contains("<title>R&amp;D &lt;notes&gt;</title>"));
        assert!(svg.contains(r#"data-node-id="a&quot;b""#));
        assert!(svg.contains(">Fish &amp; Chips</text>"));
    }

    #[test]
    fn test_empty_canvas() {
        let svg = render(&MindMapDocument::empty("blank"), HighlightState::default());
        assert!(!svg.contains("<g"));
        assert!(svg.contains(r#"viewBox="0 0 600 400""#));
    }
}
