use std::collections::BTreeMap;

use crate::ir::RelationRecord;
use crate::theme::PREDICATE_PALETTE;

use super::text::{MAX_DISPLAY_CHARS, hash_string, normalize_label, truncate_label};
use super::{Edge, Node, NodeKind, RelationGraph};

const MIN_NODE_RADIUS: f32 = 8.0;
const MAX_NODE_RADIUS: f32 = 22.0;
const NODE_RADIUS_DEGREE_SCALE: f32 = 2.6;

const CURVATURE_BUCKETS: u32 = 15;
const CURVATURE_STEP: f32 = 6.5;

/// Builds the deduplicated node/edge graph from already ranked relations.
///
/// Subjects and objects live in separate id namespaces, so a label used on
/// both sides yields two nodes. Every relation becomes its own edge; nothing
/// is merged at the relation level.
pub fn build_graph(relations: &[&RelationRecord]) -> RelationGraph {
    let mut nodes: Vec<Node> = Vec::new();
    let mut node_index: BTreeMap<String, usize> = BTreeMap::new();
    let mut edges = Vec::with_capacity(relations.len());

    for relation in relations {
        let subject_raw = normalize_label(&relation.subject_key);
        let object_raw = normalize_label(&relation.object_text);
        let predicate = normalize_label(&relation.predicate);
        let confidence = relation.confidence_score();

        let source = ensure_node(&mut nodes, &mut node_index, NodeKind::Subject, &subject_raw);
        let target = ensure_node(&mut nodes, &mut node_index, NodeKind::Object, &object_raw);
        for idx in [source, target] {
            let node = &mut nodes[idx];
            node.degree += 1;
            node.confidence_total += confidence;
        }

        edges.push(Edge {
            relation_id: relation.relation_id.clone(),
            source: nodes[source].id.clone(),
            target: nodes[target].id.clone(),
            color: predicate_color(&predicate).to_string(),
            curvature: edge_curvature(&predicate, &relation.relation_id),
            predicate,
            confidence,
            subject_label: subject_raw,
            object_label: object_raw,
            evidence_count: relation.evidence_count,
        });
    }

    for node in &mut nodes {
        node.radius = node_radius(node.degree);
        node.avg_confidence = if node.degree > 0 {
            node.confidence_total / node.degree as f32
        } else {
            0.0
        };
    }

    RelationGraph {
        nodes,
        edges,
        node_index,
    }
}

fn ensure_node(
    nodes: &mut Vec<Node>,
    node_index: &mut BTreeMap<String, usize>,
    kind: NodeKind,
    raw_label: &str,
) -> usize {
    let id = format!("{}{}", kind.id_prefix(), raw_label);
    if let Some(&idx) = node_index.get(&id) {
        return idx;
    }
    let idx = nodes.len();
    nodes.push(Node {
        id: id.clone(),
        kind,
        raw_label: raw_label.to_string(),
        display_label: truncate_label(raw_label, MAX_DISPLAY_CHARS),
        degree: 0,
        confidence_total: 0.0,
        avg_confidence: 0.0,
        x: 0.0,
        y: 0.0,
        radius: MIN_NODE_RADIUS,
    });
    node_index.insert(id, idx);
    idx
}

pub fn node_radius(degree: usize) -> f32 {
    let degree = degree.max(1) as f32;
    (MIN_NODE_RADIUS + degree.sqrt() * NODE_RADIUS_DEGREE_SCALE)
        .clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

pub fn predicate_color(predicate: &str) -> &'static str {
    PREDICATE_PALETTE[hash_string(predicate) as usize % PREDICATE_PALETTE.len()]
}

/// Signed bow for an edge, in `[-45.5, 45.5]`. Parallel edges between the
/// same pair differ by relation id and so fan out.
pub fn edge_curvature(predicate: &str, relation_id: &str) -> f32 {
    let key = format!("{predicate}{relation_id}");
    let bucket = (hash_string(&key) % CURVATURE_BUCKETS) as f32;
    (bucket - (CURVATURE_BUCKETS / 2) as f32) * CURVATURE_STEP
}
