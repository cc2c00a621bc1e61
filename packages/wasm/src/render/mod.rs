//! Renderer: drawable shapes, labels, and the entrance schedule.
//!
//! The renderer is a pure consumer of the tree, the layout, and a read-only
//! [`HighlightState`]. It never mutates selection.

pub mod animation;
pub mod label;
mod scene;
mod style;
pub mod svg;

pub use animation::{RevealCursor, RevealEvent, RevealSchedule, RevealTarget};
pub use label::{truncate_label, ELLIPSIS, MAX_LABEL_CHARS};
pub use scene::{CircleShape, EdgeShape, HighlightState, LabelShape, NodeFill, Scene, SceneNode};
pub use style::RenderStyle;
pub use svg::to_svg;
