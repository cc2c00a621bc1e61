//! InteractionManager - owns selection, hover, and press state.
//!
//! Transitions:
//! - `Unselected -> Selected(id)` when a node is clicked
//! - `Selected(a) -> Selected(b)` when a different node is clicked
//! - `Selected(_) -> Unselected` only when a new document is loaded
//!
//! Clicking empty canvas leaves the selection alone. Hover and press are
//! transient visuals and never touch the selection.

use std::vec::Drain;

use super::selection::{SelectionEvent, SelectionState};
use crate::error::MindMapError;
use crate::render::HighlightState;
use crate::tree::{MindMapDocument, NodeKey};

/// Selection state machine plus pointer affordances.
#[derive(Debug, Clone, Default)]
pub struct InteractionManager {
    state: SelectionState,
    hovered: Option<NodeKey>,
    pressed: Option<NodeKey>,
    /// Transitions not yet delivered to the details panel.
    events: Vec<SelectionEvent>,
}

impl InteractionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected_id()
    }

    pub fn hovered(&self) -> Option<NodeKey> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<NodeKey> {
        self.pressed
    }

    /// Select the node with `id`.
    ///
    /// Returns whether the selection changed. An id that is not in `doc`
    /// leaves the state untouched and reports `UnknownSelection`.
    pub fn select(&mut self, doc: &MindMapDocument, id: &str) -> Result<bool, MindMapError> {
        let Some(node) = doc.get(id) else {
            tracing::debug!(id, "ignoring selection of unknown node");
            return Err(MindMapError::UnknownSelection { id: id.to_string() });
        };

        if self.state.is_selected(id) {
            return Ok(false);
        }

        tracing::debug!(from = ?self.state.selected_id(), to = id, "selection changed");
        self.state = SelectionState::Selected(node.id.clone());
        self.events
            .push(SelectionEvent::selected(node.id.clone(), node.text.clone()));
        Ok(true)
    }

    /// Select the node drawn at `key`. Returns whether the selection changed.
    pub fn click(&mut self, doc: &MindMapDocument, key: NodeKey) -> bool {
        match doc.node(key) {
            Some(node) => {
                let id = node.id.clone();
                self.select(doc, &id).unwrap_or(false)
            }
            None => false,
        }
    }

    /// Forget everything; called when a new document is loaded.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.pressed = None;
        if self.state != SelectionState::Unselected {
            tracing::debug!("selection cleared by document load");
            self.state = SelectionState::Unselected;
            self.events.push(SelectionEvent::cleared());
        }
    }

    /// Pointer moved over `target` (or over empty canvas).
    ///
    /// Returns whether the hovered node changed.
    pub fn hover(&mut self, target: Option<NodeKey>) -> bool {
        let changed = self.hovered != target;
        self.hovered = target;
        changed
    }

    /// Pointer went down over `target`.
    pub fn press(&mut self, target: Option<NodeKey>) {
        self.pressed = target;
    }

    /// Pointer went up over `target`.
    ///
    /// Completes a click when the pointer is released over the node it went
    /// down on. Returns whether the selection changed.
    pub fn release(&mut self, doc: &MindMapDocument, target: Option<NodeKey>) -> bool {
        let pressed = self.pressed.take();
        match (pressed, target) {
            (Some(down), Some(up)) if down == up => self.click(doc, up),
            _ => false,
        }
    }

    /// Pointer left the canvas.
    pub fn leave(&mut self) {
        self.hovered = None;
        self.pressed = None;
    }

    /// Read-only view for the renderer.
    pub fn highlight(&self, doc: &MindMapDocument) -> HighlightState {
        HighlightState {
            selected: self.state.selected_id().and_then(|id| doc.key_of(id)),
            hovered: self.hovered,
            pressed: self.pressed,
        }
    }

    /// Transitions waiting for the details panel.
    pub fn pending_events(&self) -> &[SelectionEvent] {
        &self.events
    }

    /// Take all pending transitions in the order they happened.
    pub fn drain_events(&mut self) -> Drain<'_, SelectionEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(doc: &MindMapDocument, id: &str) -> NodeKey {
        doc.key_of(id).unwrap()
    }

    #[test]
    fn test_click_selects() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        assert_eq!(manager.state(), &SelectionState::Unselected);

        assert!(manager.click(&doc, key(&doc, "1")));
        assert_eq!(manager.selected_id(), Some("1"));
        assert_eq!(
            manager.pending_events(),
            &[SelectionEvent::selected("1", "Branch 1")]
        );
    }

    #[test]
    fn test_click_a_then_b_leaves_b() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();

        manager.click(&doc, key(&doc, "1.1"));
        manager.click(&doc, key(&doc, "2"));
        assert_eq!(manager.state(), &SelectionState::Selected("2".into()));

        let highlight = manager.highlight(&doc);
        assert_eq!(highlight.selected, Some(key(&doc, "2")));

        let events: Vec<_> = manager.drain_events().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].node_id.as_deref(), Some("2"));
        assert!(manager.pending_events().is_empty());
    }

    #[test]
    fn test_reclick_is_not_a_transition() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        assert!(manager.click(&doc, key(&doc, "root")));
        assert!(!manager.click(&doc, key(&doc, "root")));
        assert_eq!(manager.pending_events().len(), 1);
    }

    #[test]
    fn test_unknown_selection_ignored() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        manager.click(&doc, key(&doc, "1"));

        let result = manager.select(&doc, "stale");
        assert_eq!(result, Err(MindMapError::UnknownSelection { id: "stale".into() }));
        assert_eq!(manager.selected_id(), Some("1"));
        assert!(!manager.click(&doc, NodeKey(999)));
        assert_eq!(manager.pending_events().len(), 1);
    }

    #[test]
    fn test_reset_clears_selection() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        manager.click(&doc, key(&doc, "1"));
        manager.hover(Some(key(&doc, "2")));
        manager.drain_events().for_each(drop);

        manager.reset();
        assert_eq!(manager.state(), &SelectionState::Unselected);
        assert_eq!(manager.hovered(), None);
        assert_eq!(manager.pending_events(), &[SelectionEvent::cleared()]);

        // Resetting an unselected manager emits nothing.
        manager.drain_events().for_each(drop);
        manager.reset();
        assert!(manager.pending_events().is_empty());
    }

    #[test]
    fn test_hover_never_selects() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        manager.click(&doc, key(&doc, "1"));

        assert!(manager.hover(Some(key(&doc, "2"))));
        assert!(!manager.hover(Some(key(&doc, "2"))));
        assert_eq!(manager.selected_id(), Some("1"));
        assert!(manager.hover(None));
        assert_eq!(manager.selected_id(), Some("1"));
        assert_eq!(manager.pending_events().len(), 1);
    }

    #[test]
    fn test_press_release_completes_click() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();
        let leaf = key(&doc, "1.2");

        manager.press(Some(leaf));
        assert_eq!(manager.highlight(&doc).pressed, Some(leaf));
        assert!(manager.release(&doc, Some(leaf)));
        assert_eq!(manager.selected_id(), Some("1.2"));
        assert_eq!(manager.pressed(), None);
    }

    #[test]
    fn test_release_elsewhere_does_not_click() {
        let doc = MindMapDocument::sample();
        let mut manager = InteractionManager::new();

        manager.press(Some(key(&doc, "1")));
        assert!(!manager.release(&doc, Some(key(&doc, "2"))));
        manager.press(Some(key(&doc, "1")));
        assert!(!manager.release(&doc, None));
        // Empty canvas click does not deselect either.
        manager.click(&doc, key(&doc, "2"));
        manager.press(None);
        assert!(!manager.release(&doc, None));
        assert_eq!(manager.selected_id(), Some("2"));
    }
}
