//! Layout algorithms for mind map visualization.
//!
//! Layouts are pure functions of a validated document: the same tree always
//! yields the same positions. Results are stored as Structure-of-Arrays so
//! they can be handed to JavaScript as typed arrays without conversion.

pub mod radial;

pub use radial::{place_node, Placement, Position, RadialConfig, RadialLayout, RadialLayoutResult};
