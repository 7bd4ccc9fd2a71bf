use rebalance_core::PublicKey;
use serde::{Deserialize, Serialize};

/// A channel direction the pathfinder must avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub from: PublicKey,
    pub to: PublicKey,
}

impl DirectedEdge {
    pub fn new(from: PublicKey, to: PublicKey) -> Self {
        Self { from, to }
    }

    /// The same channel traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// Exclusions accumulated over a session.
///
/// Both collections are insertion-ordered and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    edges: Vec<DirectedEdge>,
    nodes: Vec<PublicKey>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directed edge. Returns false if it was already present.
    pub fn insert_edge(&mut self, edge: DirectedEdge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Record a node. Returns false if it was already present.
    pub fn insert_node(&mut self, node: PublicKey) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn contains_edge(&self, edge: &DirectedEdge) -> bool {
        self.edges.contains(edge)
    }

    pub fn contains_node(&self, node: &PublicKey) -> bool {
        self.nodes.contains(node)
    }

    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    pub fn nodes(&self) -> &[PublicKey] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }
}
