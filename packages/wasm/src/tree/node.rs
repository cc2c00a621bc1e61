//! Node types for the mind map tree.
//!
//! Two shapes exist:
//! - [`MindMapNode`]: the nested input form handed in by the generator
//! - [`TreeNode`]: a validated arena slot addressed by a [`NodeKey`]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena slot of a validated node.
///
/// Keys are assigned in pre-order (depth-first, siblings in order), so a
/// parent's key is always smaller than its children's keys and key order is
/// also draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Create a new NodeKey from a raw u32.
    #[inline]
    pub fn new(key: u32) -> Self {
        Self(key)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this key.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeKey {
    #[inline]
    fn from(key: u32) -> Self {
        Self(key)
    }
}

impl From<NodeKey> for u32 {
    #[inline]
    fn from(key: NodeKey) -> Self {
        key.0
    }
}

/// One labeled entry of a nested mind map, as produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    /// Document-wide unique identifier.
    pub id: String,
    /// Display label.
    pub text: String,
    /// Ordered children; empty for a leaf.
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    pub fn branch(
        id: impl Into<String>,
        text: impl Into<String>,
        children: Vec<MindMapNode>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children,
        }
    }
}

/// A validated node stored in the document arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    pub text: String,
    /// Edge count from the node's root (roots are level 0).
    pub level: u32,
    pub parent: Option<NodeKey>,
    pub children: Vec<NodeKey>,
    /// Index among the parent's children, or among the roots for a root.
    pub sibling_index: u32,
    /// Number of siblings including this node.
    pub sibling_count: u32,
}

impl TreeNode {
    /// Check if this node is a root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
