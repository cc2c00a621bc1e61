//! MindMapDocument - validated, immutable mind map.
//!
//! Construction validates the input and lays the nodes out in a flat arena in
//! pre-order. Child references are resolved into a petgraph `StableGraph` so a
//! topological sort can reject cycles before the arena is built; the arena
//! itself is built with an explicit stack and a visited set, never by
//! recursion.

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;
use serde::Deserialize;
use std::collections::HashMap;

use super::node::{MindMapNode, NodeKey, TreeNode};
use super::outline::{DocumentInput, Outline, OutlineEntry};
use crate::error::{InvalidTree, MindMapError};

/// Maximum number of levels a document may have.
///
/// Nested JSON spends two nesting levels per tree level (node object plus
/// `children` array) against serde_json's recursion limit of 128, so 60
/// levels is the deepest bound every input form can reach.
pub const MAX_DEPTH: usize = 60;

/// Title of the built-in fallback document.
pub const SAMPLE_TITLE: &str = "Sample Mind Map";

/// A validated mind map.
///
/// Nodes live in a pre-order arena: a parent always precedes its children, and
/// siblings appear in their input order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DocumentInput")]
pub struct MindMapDocument {
    title: String,
    nodes: Vec<TreeNode>,
    roots: Vec<NodeKey>,
    index: HashMap<String, NodeKey>,
}

/// Arena entry waiting to be placed.
struct Pending {
    slot: usize,
    parent: Option<NodeKey>,
    level: u32,
    sibling_index: u32,
    sibling_count: u32,
}

impl MindMapDocument {
    /// Build a document from nested nodes.
    pub fn new(title: impl Into<String>, roots: Vec<MindMapNode>) -> Result<Self, MindMapError> {
        Self::from_input(DocumentInput {
            title: title.into(),
            roots,
        })
    }

    /// Build a document from the generator's nested input.
    pub fn from_input(input: DocumentInput) -> Result<Self, MindMapError> {
        Self::from_outline(Outline::from(input))
    }

    /// Decode a nested document from JSON text and validate it.
    pub fn from_json(json: &str) -> Result<Self, MindMapError> {
        let input: DocumentInput = serde_json::from_str(json)?;
        Self::from_input(input)
    }

    /// Build a document from a flat outline.
    pub fn from_outline(outline: Outline) -> Result<Self, MindMapError> {
        let Outline {
            title,
            roots,
            mut nodes,
        } = outline;

        let (child_slots, root_slots) = resolve_references(&nodes, &roots)?;

        let mut arena: Vec<TreeNode> = Vec::with_capacity(nodes.len());
        let mut placed: Vec<Option<NodeKey>> = vec![None; nodes.len()];
        let mut root_keys = Vec::with_capacity(root_slots.len());

        let root_count = root_slots.len() as u32;
        let mut stack: Vec<Pending> = root_slots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &slot)| Pending {
                slot,
                parent: None,
                level: 0,
                sibling_index: i as u32,
                sibling_count: root_count,
            })
            .collect();

        while let Some(pending) = stack.pop() {
            if let Some(seen) = placed[pending.slot] {
                return Err(InvalidTree::Cycle {
                    id: arena[seen.index()].id.clone(),
                }
                .into());
            }
            if pending.level as usize >= MAX_DEPTH {
                return Err(InvalidTree::TooDeep { limit: MAX_DEPTH }.into());
            }

            let key = NodeKey(arena.len() as u32);
            placed[pending.slot] = Some(key);
            match pending.parent {
                Some(parent) => arena[parent.index()].children.push(key),
                None => root_keys.push(key),
            }

            let OutlineEntry { id, text, .. } = std::mem::replace(
                &mut nodes[pending.slot],
                OutlineEntry {
                    id: String::new(),
                    text: String::new(),
                    children: Vec::new(),
                },
            );
            let children = &child_slots[pending.slot];
            arena.push(TreeNode {
                id,
                text,
                level: pending.level,
                parent: pending.parent,
                children: Vec::with_capacity(children.len()),
                sibling_index: pending.sibling_index,
                sibling_count: pending.sibling_count,
            });

            let child_count = children.len() as u32;
            stack.extend(
                children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, &slot)| Pending {
                        slot,
                        parent: Some(key),
                        level: pending.level + 1,
                        sibling_index: i as u32,
                        sibling_count: child_count,
                    }),
            );
        }

        let index = arena
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), NodeKey(i as u32)))
            .collect();

        tracing::debug!(title = %title, nodes = arena.len(), "validated mind map document");

        Ok(Self {
            title,
            nodes: arena,
            roots: root_keys,
            index,
        })
    }

    /// A document with no nodes. Renders as an empty canvas.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in fallback document shown when no document is supplied.
    pub fn sample() -> Self {
        let roots = vec![MindMapNode::branch(
            "root",
            "Central Topic",
            vec![
                MindMapNode::branch(
                    "1",
                    "Branch 1",
                    vec![
                        MindMapNode::leaf("1.1", "Leaf A"),
                        MindMapNode::leaf("1.2", "Leaf B"),
                    ],
                ),
                MindMapNode::branch("2", "Branch 2", vec![MindMapNode::leaf("2.1", "Leaf C")]),
            ],
        )];
        Self::new(SAMPLE_TITLE, roots).unwrap_or_else(|_| Self::empty(SAMPLE_TITLE))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    /// All nodes in pre-order; index with [`NodeKey::index`].
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Root keys in input order.
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    pub fn node(&self, key: NodeKey) -> Option<&TreeNode> {
        self.nodes.get(key.index())
    }

    /// Look up a node's key by its id.
    pub fn key_of(&self, id: &str) -> Option<NodeKey> {
        self.index.get(id).copied()
    }

    /// Look up a node by its id.
    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.key_of(id).and_then(|key| self.node(key))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Zero roots. Not an error; the diagram is simply blank.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Iterate `(key, node)` pairs in pre-order.
    pub fn walk(&self) -> impl Iterator<Item = (NodeKey, &TreeNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeKey(i as u32), node))
    }

    /// Total number of nodes across all roots.
    pub fn count_nodes(&self) -> usize {
        self.walk().count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> u32 {
        self.walk().map(|(_, node)| node.level).max().unwrap_or(0)
    }
}

impl TryFrom<DocumentInput> for MindMapDocument {
    type Error = MindMapError;

    fn try_from(input: DocumentInput) -> Result<Self, Self::Error> {
        Self::from_input(input)
    }
}

impl TryFrom<Outline> for MindMapDocument {
    type Error = MindMapError;

    fn try_from(outline: Outline) -> Result<Self, Self::Error> {
        Self::from_outline(outline)
    }
}

/// Total node count of a document.
pub fn count_nodes(doc: &MindMapDocument) -> usize {
    doc.count_nodes()
}

/// Maximum root-to-leaf edge count of a document.
pub fn depth(doc: &MindMapDocument) -> u32 {
    doc.depth()
}

/// Resolve outline ids to slots and check that the references form a forest.
///
/// Returns each slot's child slots plus the root slots.
fn resolve_references(
    nodes: &[OutlineEntry],
    roots: &[String],
) -> Result<(Vec<Vec<usize>>, Vec<usize>), InvalidTree> {
    let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (slot, entry) in nodes.iter().enumerate() {
        if slot_of.insert(entry.id.as_str(), slot).is_some() {
            return Err(InvalidTree::DuplicateId {
                id: entry.id.clone(),
            });
        }
    }

    let mut graph: StableGraph<usize, (), Directed> =
        StableGraph::with_capacity(nodes.len(), nodes.len());
    let indices: Vec<NodeIndex> = (0..nodes.len()).map(|slot| graph.add_node(slot)).collect();
    let mut parent_count = vec![0u32; nodes.len()];
    let mut child_slots = Vec::with_capacity(nodes.len());

    for (slot, entry) in nodes.iter().enumerate() {
        let mut children = Vec::with_capacity(entry.children.len());
        for child in &entry.children {
            let &child_slot =
                slot_of
                    .get(child.as_str())
                    .ok_or_else(|| InvalidTree::UnknownChild {
                        parent: entry.id.clone(),
                        child: child.clone(),
                    })?;
            graph.add_edge(indices[slot], indices[child_slot], ());
            parent_count[child_slot] += 1;
            children.push(child_slot);
        }
        child_slots.push(children);
    }

    let mut root_slots = Vec::with_capacity(roots.len());
    for root in roots {
        let &slot = slot_of
            .get(root.as_str())
            .ok_or_else(|| InvalidTree::UnknownRoot { id: root.clone() })?;
        parent_count[slot] += 1;
        root_slots.push(slot);
    }

    if let Err(cycle) = toposort(&graph, None) {
        let slot = graph[cycle.node_id()];
        return Err(InvalidTree::Cycle {
            id: nodes[slot].id.clone(),
        });
    }

    if let Some(slot) = parent_count.iter().position(|&count| count > 1) {
        return Err(InvalidTree::MultipleParents {
            id: nodes[slot].id.clone(),
        });
    }

    if let Some(slot) = parent_count.iter().position(|&count| count == 0) {
        return Err(InvalidTree::Detached {
            id: nodes[slot].id.clone(),
        });
    }

    Ok((child_slots, root_slots))
}
