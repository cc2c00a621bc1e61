//! Interaction manager: selection state machine and pointer affordances.
//!
//! The manager is the only writer of selection state. The renderer reads it
//! through [`HighlightState`](crate::render::HighlightState) and the details
//! panel receives [`SelectionEvent`]s.

mod manager;
mod selection;

pub use manager::InteractionManager;
pub use selection::{SelectionEvent, SelectionState};
