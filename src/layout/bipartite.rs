use crate::config::BipartiteConfig;

use super::text::hash_string;
use super::{NodeKind, RelationGraph};

/// Places subjects and objects into two vertical columns.
///
/// Each column is ordered by degree (highest first, then label) and spread
/// evenly between the top and bottom margins. Columns with more than one node
/// get a small hash-derived jitter so dense columns stay legible; a lone node
/// sits exactly on the column center.
pub fn layout_bipartite(
    graph: &mut RelationGraph,
    width: f32,
    height: f32,
    config: &BipartiteConfig,
) {
    let top = config.top;
    let bottom = (height - config.bottom_margin).max(top);

    for (kind, column) in [
        (NodeKind::Subject, config.subject_column),
        (NodeKind::Object, config.object_column),
    ] {
        let order = column_order(graph, kind);
        place_column(graph, &order, width * column, top, bottom, config);
    }
}

fn column_order(graph: &RelationGraph, kind: NodeKind) -> Vec<usize> {
    let mut order: Vec<usize> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind == kind)
        .map(|(idx, _)| idx)
        .collect();
    order.sort_by(|&a, &b| {
        let na = &graph.nodes[a];
        let nb = &graph.nodes[b];
        nb.degree
            .cmp(&na.degree)
            .then_with(|| na.raw_label.cmp(&nb.raw_label))
    });
    order
}

fn place_column(
    graph: &mut RelationGraph,
    order: &[usize],
    column_x: f32,
    top: f32,
    bottom: f32,
    config: &BipartiteConfig,
) {
    match order.len() {
        0 => {}
        1 => {
            let node = &mut graph.nodes[order[0]];
            node.x = column_x;
            node.y = (top + bottom) / 2.0;
        }
        count => {
            let step = (bottom - top) / (count - 1) as f32;
            for (slot, &idx) in order.iter().enumerate() {
                let node = &mut graph.nodes[idx];
                let offset = centered_bucket(&node.id, config.offset_buckets) * config.offset_step;
                let wobble =
                    centered_bucket(&node.raw_label, config.wobble_buckets) * config.wobble_step;
                node.x = column_x + offset;
                node.y = (top + slot as f32 * step + wobble).max(top).min(bottom);
            }
        }
    }
}

/// Maps `text` to an integer bucket in `[-buckets/2, buckets/2]`.
fn centered_bucket(text: &str, buckets: u32) -> f32 {
    let buckets = buckets.max(1);
    (hash_string(text) % buckets) as f32 - (buckets / 2) as f32
}
