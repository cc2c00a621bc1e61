//! MindMapEngine - one viewer session.
//!
//! The engine owns the loaded document and everything derived from it:
//! - the radial layout (SoA position buffers)
//! - the spatial index used for pointer hit testing
//! - the entrance reveal schedule and its playback cursor
//! - the interaction manager (selection, hover, press)
//!
//! Loading a document recomputes all derived state in one synchronous pass
//! and resets the selection. A document that fails validation is replaced by
//! the built-in sample so the viewer always has something to show.

use serde::{Deserialize, Serialize};

use crate::error::MindMapError;
use crate::interaction::{InteractionManager, SelectionEvent};
use crate::layout::{RadialConfig, RadialLayout, RadialLayoutResult};
use crate::render::{to_svg, RenderStyle, RevealCursor, RevealEvent, RevealSchedule, Scene};
use crate::spatial::{NodeCircle, SpatialIndex};
use crate::tree::{MindMapDocument, NodeKey, Outline};

/// Configuration for a viewer session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: RadialConfig,
    pub style: RenderStyle,
}

/// The summary pair shown next to the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_nodes: usize,
    pub max_depth: u32,
}

/// What happened to a supplied document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The supplied document is now shown.
    Loaded,
    /// The supplied document was rejected; the sample is shown instead.
    FellBack(MindMapError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// A single mind map viewer session.
pub struct MindMapEngine {
    config: EngineConfig,
    layout: RadialLayout,
    document: MindMapDocument,
    positions: RadialLayoutResult,
    spatial: SpatialIndex,
    schedule: RevealSchedule,
    cursor: RevealCursor,
    interaction: InteractionManager,
}

impl MindMapEngine {
    /// Create an engine showing the sample document.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom layout and style, showing the sample.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = Self {
            layout: RadialLayout::new(config.layout.clone()),
            config,
            document: MindMapDocument::empty(""),
            positions: RadialLayoutResult::default(),
            spatial: SpatialIndex::new(),
            schedule: RevealSchedule::default(),
            cursor: RevealCursor::new(),
            interaction: InteractionManager::new(),
        };
        engine.load(MindMapDocument::sample());
        engine
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the current document and recompute everything derived from it.
    pub fn load(&mut self, document: MindMapDocument) {
        self.positions = self.layout.compute(&document);

        let circles = document
            .walk()
            .filter_map(|(key, node)| {
                let pos = self.positions.position(key)?;
                Some(NodeCircle::new(
                    key,
                    pos.x,
                    pos.y,
                    self.config.style.radius_for(node.level),
                ))
            })
            .collect();
        self.spatial.rebuild(circles);

        self.schedule = RevealSchedule::new(&document);
        self.cursor.restart();
        self.interaction.reset();

        tracing::info!(
            title = document.title(),
            nodes = document.count_nodes(),
            depth = document.depth(),
            "loaded mind map"
        );
        self.document = document;
    }

    /// Load `result` if it is a valid document, otherwise the sample.
    pub fn load_or_sample(&mut self, result: Result<MindMapDocument, MindMapError>) -> LoadOutcome {
        match result {
            Ok(document) => {
                self.load(document);
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejected mind map document, showing sample");
                self.load_sample();
                LoadOutcome::FellBack(err)
            }
        }
    }

    /// Open the viewer with the document handed over by the generator, if any.
    pub fn open(&mut self, supplied: Option<MindMapDocument>) {
        match supplied {
            Some(document) => self.load(document),
            None => self.load_sample(),
        }
    }

    /// Decode, validate, and load a nested document from JSON text.
    pub fn load_json(&mut self, json: &str) -> LoadOutcome {
        self.load_or_sample(MindMapDocument::from_json(json))
    }

    /// Validate and load a flat outline.
    pub fn load_outline(&mut self, outline: Outline) -> LoadOutcome {
        self.load_or_sample(MindMapDocument::from_outline(outline))
    }

    pub fn load_sample(&mut self) {
        self.load(MindMapDocument::sample());
    }

    // =========================================================================
    // Document Info
    // =========================================================================

    pub fn document(&self) -> &MindMapDocument {
        &self.document
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn positions(&self) -> &RadialLayoutResult {
        &self.positions
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_nodes: self.document.count_nodes(),
            max_depth: self.document.depth(),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Snapshot of the diagram with the current highlight.
    pub fn scene(&self) -> Scene {
        let highlight = self.interaction.highlight(&self.document);
        Scene::build(&self.document, &self.positions, &highlight, &self.config.style)
    }

    pub fn to_svg(&self) -> String {
        to_svg(&self.scene(), self.document.title(), &self.config.style)
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Node under a point, if any. Unrevealed nodes are hit too.
    ///
    /// The pressed or hovered node is tested at the size it is drawn.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<NodeKey> {
        let style = &self.config.style;
        let scaled = match (self.interaction.pressed(), self.interaction.hovered()) {
            (Some(key), _) => Some((key, style.press_scale)),
            (None, Some(key)) => Some((key, style.hover_scale)),
            (None, None) => None,
        };
        self.spatial.hit_scaled(x, y, scaled)
    }

    /// Returns the node that was pressed, if any.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<NodeKey> {
        let target = self.hit_test(x, y);
        self.interaction.press(target);
        target
    }

    /// Returns whether the release completed a click that changed selection.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        let target = self.hit_test(x, y);
        self.interaction.release(&self.document, target)
    }

    /// Returns whether the hovered node changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let target = self.hit_test(x, y);
        self.interaction.hover(target)
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.leave();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a node by id, as the details panel or a host shortcut would.
    pub fn select(&mut self, id: &str) -> Result<bool, MindMapError> {
        self.interaction.select(&self.document, id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.interaction.selected_id()
    }

    pub fn interaction(&self) -> &InteractionManager {
        &self.interaction
    }

    /// Take the selection transitions not yet delivered.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        self.interaction.drain_events().collect()
    }

    // =========================================================================
    // Entrance Animation
    // =========================================================================

    pub fn reveal_schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// Events due `elapsed_secs` into the entrance that were not yet returned.
    pub fn tick_reveal(&mut self, elapsed_secs: f32) -> &[RevealEvent] {
        self.cursor.advance(&self.schedule, elapsed_secs)
    }

    pub fn restart_reveal(&mut self) {
        self.cursor.restart();
    }
}

impl Default for MindMapEngine {
    fn default() -> Self {
        Self::new()
    }
}
