use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::LayoutMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Subject,
    Object,
}

impl NodeKind {
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Subject => "s:",
            NodeKind::Object => "o:",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub raw_label: String,
    pub display_label: String,
    pub degree: usize,
    pub confidence_total: f32,
    pub avg_confidence: f32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub relation_id: String,
    pub source: String,
    pub target: String,
    pub predicate: String,
    pub color: String,
    pub curvature: f32,
    pub confidence: f32,
    pub subject_label: String,
    pub object_label: String,
    pub evidence_count: Option<u32>,
}

/// Deduplicated nodes and edges before any coordinates are assigned.
///
/// `node_index` maps a node id to its position in `nodes`; that position is
/// the stable integer handle the layout passes address nodes by.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub node_index: BTreeMap<String, usize>,
}

impl RelationGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).and_then(|&idx| self.nodes.get(idx))
    }

    /// Resolves both endpoints of an edge to node handles.
    pub fn endpoints(&self, edge: &Edge) -> Option<(usize, usize)> {
        let source = *self.node_index.get(&edge.source)?;
        let target = *self.node_index.get(&edge.target)?;
        Some((source, target))
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub mode: LayoutMode,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub node_index: BTreeMap<String, usize>,
}

impl Layout {
    pub fn empty(mode: LayoutMode, width: f32, height: f32) -> Self {
        Self {
            mode,
            width,
            height,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: BTreeMap::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).and_then(|&idx| self.nodes.get(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
