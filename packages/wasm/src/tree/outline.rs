//! Input forms accepted by the tree model.
//!
//! The generator hands over a nested [`DocumentInput`]. Hosts that keep their
//! nodes in a flat table can hand over an [`Outline`] instead, where children
//! are referenced by id. Nested input is flattened into an outline so both go
//! through the same validation.

use serde::{Deserialize, Serialize};

use super::node::MindMapNode;

/// Nested document as produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    pub title: String,
    /// Top-level nodes. The generator calls this field `nodes`.
    #[serde(alias = "nodes", default)]
    pub roots: Vec<MindMapNode>,
}

/// One node of a flat outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub id: String,
    pub text: String,
    /// Child ids in display order.
    #[serde(default)]
    pub children: Vec<String>,
}

/// Flat document: a node table plus the ordered root ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    pub roots: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<OutlineEntry>,
}

impl From<DocumentInput> for Outline {
    /// Flatten a nested document in pre-order with an explicit stack.
    ///
    /// Children are moved out of each node before it is dropped, so deep
    /// input never recurses here or in `Drop`.
    fn from(input: DocumentInput) -> Self {
        let roots = input.roots.iter().map(|node| node.id.clone()).collect();
        let mut nodes = Vec::new();

        let mut stack: Vec<MindMapNode> = input.roots.into_iter().rev().collect();
        while let Some(mut node) = stack.pop() {
            let children = std::mem::take(&mut node.children);
            nodes.push(OutlineEntry {
                id: node.id,
                text: node.text,
                children: children.iter().map(|child| child.id.clone()).collect(),
            });
            stack.extend(children.into_iter().rev());
        }

        Self {
            title: input.title,
            roots,
            nodes,
        }
    }
}
