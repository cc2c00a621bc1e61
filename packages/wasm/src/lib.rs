//! Radial Mind Map - WASM Module
//!
//! This module turns a hierarchical outline into an interactive radial
//! diagram. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the same engine is usable from Rust directly.
//!
//! # Architecture
//!
//! - `tree`: validated, immutable mind map documents (arena in pre-order)
//! - `layout`: radial fan-out layout (pure, deterministic)
//! - `render`: scene shapes, label truncation, SVG export, entrance schedule
//! - `interaction`: selection state machine, hover and press
//! - `spatial`: R-tree hit testing for pointer input
//! - `engine`: one viewer session tying the above together
//! - `logging`: `tracing` output to the browser console

use js_sys::{Float32Array, Function};
use wasm_bindgen::prelude::*;

pub mod engine;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod render;
pub mod spatial;
pub mod tree;

pub use engine::{EngineConfig, LoadOutcome, MindMapEngine, Summary};
pub use error::{InvalidTree, MindMapError};

use tree::{MindMapDocument, NodeKey, Outline};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_console_logging(tracing::level_filters::LevelFilter::INFO);
}

/// Viewer entry point exposed to JavaScript.
///
/// Wraps a [`MindMapEngine`] and forwards selection changes to an optional
/// JS callback (the details panel).
#[wasm_bindgen(js_name = MindMapViewer)]
pub struct MindMapViewerWasm {
    engine: MindMapEngine,
    on_selection: Option<Function>,
}

#[wasm_bindgen(js_class = MindMapViewer)]
impl MindMapViewerWasm {
    /// Create a viewer showing the sample document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: MindMapEngine::new(),
            on_selection: None,
        }
    }

    /// Create a viewer from a partial `{ layout, style }` config object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<MindMapViewerWasm, JsError> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            engine: MindMapEngine::with_config(config),
            on_selection: None,
        })
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a nested `{ title, nodes | roots }` document.
    ///
    /// Returns false when the document was rejected and the sample is shown.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, value: JsValue) -> bool {
        let result =
            stringify_document(&value).and_then(|json| MindMapDocument::from_json(&json));
        let outcome = self.engine.load_or_sample(result);
        self.finish_load(outcome)
    }

    /// Load a nested document from JSON text.
    #[wasm_bindgen(js_name = loadDocumentJson)]
    pub fn load_document_json(&mut self, json: &str) -> bool {
        let outcome = self.engine.load_json(json);
        self.finish_load(outcome)
    }

    /// Load a flat `{ title, roots, nodes }` outline.
    #[wasm_bindgen(js_name = loadOutline)]
    pub fn load_outline(&mut self, value: JsValue) -> bool {
        let outcome = match serde_wasm_bindgen::from_value::<Outline>(value) {
            Ok(outline) => self.engine.load_outline(outline),
            Err(err) => self
                .engine
                .load_or_sample(Err(MindMapError::Decode(err.to_string()))),
        };
        self.finish_load(outcome)
    }

    /// Show the built-in sample document.
    #[wasm_bindgen(js_name = loadSample)]
    pub fn load_sample(&mut self) {
        self.engine.load_sample();
        self.flush_events();
    }

    // =========================================================================
    // Document Info
    // =========================================================================

    pub fn title(&self) -> String {
        self.engine.document().title().to_string()
    }

    /// Total number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.document().count_nodes() as u32
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> u32 {
        self.engine.document().depth()
    }

    /// `{ totalNodes, maxDepth }`.
    pub fn summary(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.summary())?)
    }

    /// Id of the node stored at a buffer slot.
    #[wasm_bindgen(js_name = getNodeId)]
    pub fn get_node_id(&self, key: u32) -> Option<String> {
        self.engine
            .document()
            .node(NodeKey(key))
            .map(|node| node.id.clone())
    }

    // =========================================================================
    // Layout Buffers
    // =========================================================================

    /// X positions, one per node in draw order.
    #[wasm_bindgen(js_name = getPositionsX)]
    pub fn get_positions_x(&self) -> Float32Array {
        Float32Array::from(&self.engine.positions().positions_x[..])
    }

    /// Y positions, one per node in draw order.
    #[wasm_bindgen(js_name = getPositionsY)]
    pub fn get_positions_y(&self) -> Float32Array {
        Float32Array::from(&self.engine.positions().positions_y[..])
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Drawable scene with the current selection and hover applied.
    pub fn scene(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.scene())?)
    }

    /// Standalone SVG document of the current diagram.
    #[wasm_bindgen(js_name = toSvg)]
    pub fn to_svg(&self) -> String {
        self.engine.to_svg()
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Returns the id of the pressed node, if any.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<String> {
        let key = self.engine.pointer_down(x, y)?;
        self.get_node_id(key.raw())
    }

    /// Returns true when the release selected a different node.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        let changed = self.engine.pointer_up(x, y);
        self.flush_events();
        changed
    }

    /// Returns true when the hovered node changed and a redraw is needed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.engine.pointer_move(x, y)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a node by id. Unknown ids are ignored and return false.
    #[wasm_bindgen(js_name = selectNode)]
    pub fn select_node(&mut self, id: &str) -> bool {
        let changed = self.engine.select(id).unwrap_or(false);
        self.flush_events();
        changed
    }

    #[wasm_bindgen(js_name = selectedNodeId)]
    pub fn selected_node_id(&self) -> Option<String> {
        self.engine.selected_id().map(str::to_string)
    }

    /// Register the details panel callback, called with `{ nodeId, text }`.
    #[wasm_bindgen(js_name = onSelectionChange)]
    pub fn on_selection_change(&mut self, callback: Function) {
        self.on_selection = Some(callback);
    }

    // =========================================================================
    // Entrance Animation
    // =========================================================================

    /// The full reveal schedule for the current document.
    #[wasm_bindgen(js_name = revealSchedule)]
    pub fn reveal_schedule(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.reveal_schedule().as_slice())?)
    }

    /// Reveal events that became due `elapsed` seconds into the entrance.
    #[wasm_bindgen(js_name = tickReveal)]
    pub fn tick_reveal(&mut self, elapsed: f32) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.tick_reveal(elapsed))?)
    }

    #[wasm_bindgen(js_name = restartReveal)]
    pub fn restart_reveal(&mut self) {
        self.engine.restart_reveal();
    }
}

impl MindMapViewerWasm {
    fn finish_load(&mut self, outcome: LoadOutcome) -> bool {
        if let LoadOutcome::FellBack(err) = &outcome {
            web_sys::console::warn_1(
                &format!("mind map rejected, showing sample: {err}").into(),
            );
        }
        self.flush_events();
        outcome.is_loaded()
    }

    /// Deliver pending selection transitions to the JS callback.
    ///
    /// Events are drained even with no callback registered.
    fn flush_events(&mut self) {
        let events = self.engine.drain_events();
        let Some(callback) = &self.on_selection else {
            return;
        };
        for event in events {
            let value = match serde_wasm_bindgen::to_value(&event) {
                Ok(value) => value,
                Err(err) => {
                    web_sys::console::error_1(&err.to_string().into());
                    continue;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                web_sys::console::error_1(&err);
            }
        }
    }
}

/// Serialize a nested JS document to JSON text.
///
/// Nested objects are never decoded directly: an object that lists one of its
/// ancestors as a child would recurse without bound. `JSON.stringify` throws
/// on such cycles, and the JSON path is depth-bounded.
fn stringify_document(value: &JsValue) -> Result<String, MindMapError> {
    let json = js_sys::JSON::stringify(value).map_err(|err| {
        MindMapError::Decode(format!("document is cyclic or not serializable: {err:?}"))
    })?;
    json.as_string()
        .ok_or_else(|| MindMapError::Decode("document is not a JSON value".to_string()))
}

impl Default for MindMapViewerWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use interaction::SelectionState;
    use layout::RadialLayout;
    use render::{HighlightState, RenderStyle, Scene};
    use tree::{MindMapNode, OutlineEntry};

    /// Full pipeline on the sample: tree → layout → scene → selection.
    #[test]
    fn test_sample_pipeline() {
        let doc = MindMapDocument::sample();
        assert_eq!(tree::count_nodes(&doc), 6);
        assert_eq!(tree::depth(&doc), 2);

        let layout = RadialLayout::with_defaults().compute(&doc);
        assert_eq!(layout.node_count, 6);

        let scene = Scene::build(&doc, &layout, &HighlightState::default(), &RenderStyle::default());
        assert_eq!(scene.nodes.len(), 6);
        assert_eq!(scene.edge_count(), 5);

        let labels: Vec<_> = scene.nodes.iter().map(|n| n.label.text.as_str()).collect();
        assert_eq!(
            labels,
            ["Central Topic", "Branch 1", "Leaf A", "Leaf B", "Branch 2", "Leaf C"]
        );
    }

    /// A single root without children: one centered node and no edges.
    #[test]
    fn test_single_root_scenario() {
        let mut engine = MindMapEngine::new();
        let doc = MindMapDocument::new("solo", vec![MindMapNode::leaf("only", "Only")]).unwrap();
        engine.load(doc);

        assert_eq!(engine.summary(), Summary { total_nodes: 1, max_depth: 0 });
        assert_eq!(engine.positions().positions_x, vec![300.0]);
        assert_eq!(engine.positions().positions_y, vec![200.0]);
        assert_eq!(engine.scene().edge_count(), 0);
    }

    /// Cyclic outlines are rejected before layout and the sample is shown.
    #[test]
    fn test_cyclic_input_scenario() {
        let cyclic = Outline {
            title: "loop".into(),
            roots: vec!["root".into()],
            nodes: vec![
                OutlineEntry {
                    id: "root".into(),
                    text: "Root".into(),
                    children: vec!["child".into()],
                },
                OutlineEntry {
                    id: "child".into(),
                    text: "Child".into(),
                    children: vec!["root".into()],
                },
            ],
        };
        assert!(matches!(
            MindMapDocument::from_outline(cyclic.clone()),
            Err(MindMapError::InvalidTree(InvalidTree::Cycle { .. }))
        ));

        let mut engine = MindMapEngine::new();
        let outcome = engine.load_outline(cyclic);
        assert!(!outcome.is_loaded());
        assert_eq!(engine.document(), &MindMapDocument::sample());
    }

    /// Click A then B via pointer input; reload clears the selection.
    #[test]
    fn test_selection_scenario() {
        let mut engine = MindMapEngine::new();
        let click = |engine: &mut MindMapEngine, id: &str| {
            let key = engine.document().key_of(id).unwrap();
            let pos = engine.positions().position(key).unwrap();
            engine.pointer_down(pos.x, pos.y);
            engine.pointer_up(pos.x, pos.y)
        };

        assert!(click(&mut engine, "1"));
        assert!(click(&mut engine, "2.1"));
        assert_eq!(engine.interaction().state(), &SelectionState::Selected("2.1".into()));

        let scene = engine.scene();
        let selected: Vec<_> = scene
            .nodes
            .iter()
            .filter(|n| n.circle.fill == render::NodeFill::Selected)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(selected, ["2.1"]);

        engine.load_sample();
        assert_eq!(engine.interaction().state(), &SelectionState::Unselected);

        let events = engine.drain_events();
        let ids: Vec<_> = events.iter().map(|e| e.node_id.as_deref()).collect();
        assert_eq!(ids, [Some("1"), Some("2.1"), None]);
    }

    /// Layout of a wider tree is deterministic and keeps rings ordered.
    #[test]
    fn test_wide_tree_layout() {
        let branches: Vec<_> = (0..5)
            .map(|b| {
                let leaves = (0..b + 1)
                    .map(|l| MindMapNode::leaf(format!("{b}.{l}"), format!("Leaf {b}.{l}")))
                    .collect();
                MindMapNode::branch(format!("{b}"), format!("Branch {b}"), leaves)
            })
            .collect();
        let doc = MindMapDocument::new("wide", vec![MindMapNode::branch("r", "Root", branches)])
            .unwrap();
        assert_eq!(doc.count_nodes(), 1 + 5 + 15);

        let layout = RadialLayout::with_defaults();
        let first = layout.compute(&doc);
        assert_eq!(first, layout.compute(&doc));

        for (key, node) in doc.walk() {
            let pos = first.position(key).unwrap();
            let dist = ((pos.x - 300.0).powi(2) + (pos.y - 200.0).powi(2)).sqrt();
            if node.level > 0 {
                let expected = layout.config().ring_radius(node.level);
                assert!((dist - expected).abs() < 0.01, "{} off ring", node.id);
            }
        }
    }
}
