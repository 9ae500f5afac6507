mod bipartite;
mod builder;
mod force;
mod ranking;
mod routing;
mod text;
pub(crate) mod types;
pub use bipartite::layout_bipartite;
pub use builder::{build_graph, edge_curvature, node_radius, predicate_color};
pub use force::{ForceParams, cooling_alpha, layout_force};
pub use ranking::rank_relations;
pub use routing::{
    EdgePath, Point, bipartite_edge_path, edge_path, force_edge_path, route_edges,
};
pub use text::{EMPTY_LABEL, MAX_DISPLAY_CHARS, hash_string, truncate_label};
pub use types::*;

use crate::config::{LayoutConfig, LayoutMode};
use crate::ir::RelationRecord;

/// Runs the whole pipeline: rank, build, then place nodes with the configured
/// layout mode.
///
/// The configuration is normalized first, so any input is accepted. Nothing
/// is cached between calls; identical inputs give identical coordinates.
pub fn compute_layout(relations: &[RelationRecord], config: &LayoutConfig) -> Layout {
    let config = config.normalized();
    let ranked = rank_relations(relations, config.min_confidence, config.max_relations);
    log::debug!(
        "ranked {} of {} relations (min confidence {:.2}, cap {})",
        ranked.len(),
        relations.len(),
        config.min_confidence,
        config.max_relations
    );

    let mut graph = build_graph(&ranked);
    log::debug!(
        "built graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    match config.layout_mode {
        LayoutMode::Force => layout_force(&mut graph, config.width, config.height, &config.force),
        LayoutMode::Bipartite => {
            layout_bipartite(&mut graph, config.width, config.height, &config.bipartite)
        }
    }

    Layout {
        mode: config.layout_mode,
        width: config.width,
        height: config.height,
        nodes: graph.nodes,
        edges: graph.edges,
        node_index: graph.node_index,
    }
}
