//! Error types for document validation and selection.

use thiserror::Error;

/// Reasons a document is rejected at construction time.
///
/// Every variant means the node graph is not a well-formed tree with unique
/// ids, so the document never reaches the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTree {
    /// Two nodes share the same id.
    #[error("duplicate node id `{id}`")]
    DuplicateId { id: String },

    /// An outline entry lists a child id that no node carries.
    #[error("node `{parent}` lists unknown child `{child}`")]
    UnknownChild { parent: String, child: String },

    /// An outline names a root id that no node carries.
    #[error("unknown root `{id}`")]
    UnknownRoot { id: String },

    /// The node can reach itself through its children.
    #[error("cycle through node `{id}`")]
    Cycle { id: String },

    /// The node is listed under more than one parent (a root counts as one).
    #[error("node `{id}` has more than one parent")]
    MultipleParents { id: String },

    /// The node is not reachable from any root.
    #[error("node `{id}` is not reachable from any root")]
    Detached { id: String },

    /// The tree is deeper than the traversal bound.
    #[error("tree is deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Errors surfaced by the mind map engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MindMapError {
    /// The document failed validation.
    #[error("invalid tree: {0}")]
    InvalidTree(#[from] InvalidTree),

    /// A selection referenced an id that is not in the current document.
    #[error("unknown selection `{id}`")]
    UnknownSelection { id: String },

    /// The input could not be decoded into a document.
    #[error("failed to decode document: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for MindMapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
