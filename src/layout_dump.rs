use crate::layout::{Layout, NodeKind, route_edges};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub mode: String,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub node_index: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub relation_id: String,
    pub source: String,
    pub target: String,
    pub predicate: String,
    pub color: String,
    pub curvature: f32,
    pub confidence: f32,
    pub subject_label: String,
    pub object_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_count: Option<u32>,
    pub path: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind,
                raw_label: node.raw_label.clone(),
                display_label: node.display_label.clone(),
                degree: node.degree,
                confidence_total: node.confidence_total,
                avg_confidence: node.avg_confidence,
                x: node.x,
                y: node.y,
                radius: node.radius,
            })
            .collect();

        let mut paths: BTreeMap<usize, String> = route_edges(layout)
            .into_iter()
            .map(|(idx, path)| (idx, path.to_svg_path()))
            .collect();

        let edges = layout
            .edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| EdgeDump {
                relation_id: edge.relation_id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                predicate: edge.predicate.clone(),
                color: edge.color.clone(),
                curvature: edge.curvature,
                confidence: edge.confidence,
                subject_label: edge.subject_label.clone(),
                object_label: edge.object_label.clone(),
                evidence_count: edge.evidence_count,
                path: paths.remove(&idx),
            })
            .collect();

        LayoutDump {
            mode: format!("{:?}", layout.mode).to_lowercase(),
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
            node_index: layout.node_index.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            println!("{}", dump.to_json()?);
        }
    }
    Ok(())
}
