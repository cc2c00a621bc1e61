//! Spatial indexing for pointer hit testing.
//!
//! This module provides an R-tree based index of rendered node circles so
//! pointer coordinates resolve to nodes in O(log n).

mod rtree;

pub use rtree::{NodeCircle, SpatialIndex};
