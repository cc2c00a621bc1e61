//! Tree model: the canonical in-memory mind map.
//!
//! Input arrives either nested ([`DocumentInput`]) or flat ([`Outline`]) and
//! is validated into an immutable [`MindMapDocument`]. Validation rejects
//! duplicate ids and any node that is its own ancestor, so everything
//! downstream can assume a well-formed forest.

mod document;
mod node;
mod outline;

pub use document::{count_nodes, depth, MindMapDocument, MAX_DEPTH, SAMPLE_TITLE};
pub use node::{MindMapNode, NodeKey, TreeNode};
pub use outline::{DocumentInput, Outline, OutlineEntry};
