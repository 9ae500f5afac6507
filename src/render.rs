use crate::config::RenderConfig;
use crate::layout::{Edge, Layout, NodeKind, route_edges};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const MIN_CANVAS: f32 = 200.0;
const NODE_STROKE_WIDTH: f32 = 1.2;
// Evidence beyond this many observations no longer thickens an edge.
const EVIDENCE_WIDTH_CAP: u32 = 8;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(MIN_CANVAS);
    let height = layout.height.max(MIN_CANVAS);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if config.arrowheads {
        svg.push_str("<defs>");
        svg.push_str("<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"5\" markerHeight=\"5\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"context-stroke\"/></marker>");
        svg.push_str("</defs>");
    }

    svg.push_str("<g class=\"edges\" fill=\"none\">");
    for (idx, path) in route_edges(layout) {
        let edge = &layout.edges[idx];
        let stroke_width = edge_stroke_width(edge, config);
        let marker = if config.arrowheads {
            " marker-end=\"url(#arrow)\""
        } else {
            ""
        };
        let evidence = edge
            .evidence_count
            .map(|count| format!(", {count} evidence"))
            .unwrap_or_default();
        svg.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width:.2}\" stroke-opacity=\"{}\"{marker}><title>{} {} {} ({:.2}{evidence})</title></path>",
            path.to_svg_path(),
            edge.color,
            theme.edge_opacity,
            escape_xml(&edge.subject_label),
            escape_xml(&edge.predicate),
            escape_xml(&edge.object_label),
            edge.confidence,
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        let fill = match node.kind {
            NodeKind::Subject => theme.subject_fill.as_str(),
            NodeKind::Object => theme.object_fill.as_str(),
        };
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{NODE_STROKE_WIDTH}\"><title>{}</title></circle>",
            node.x,
            node.y,
            node.radius,
            fill,
            theme.node_stroke,
            escape_xml(&node.raw_label),
        ));
        if config.show_labels {
            let label_y = node.y + node.radius + config.label_gap + theme.font_size;
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{label_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                node.x,
                escape_xml(&theme.font_family),
                theme.font_size,
                theme.label_color,
                escape_xml(&node.display_label),
            ));
        }
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = if render_cfg.png_scale.is_finite() && render_cfg.png_scale > 0.0 {
        render_cfg.png_scale
    } else {
        1.0
    };
    let size = tree.size().to_int_size();
    let width = (size.width() as f32 * scale).ceil() as u32;
    let height = (size.height() as f32 * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn edge_stroke_width(edge: &Edge, config: &RenderConfig) -> f32 {
    let evidence = edge
        .evidence_count
        .map_or(0, |count| count.saturating_sub(1).min(EVIDENCE_WIDTH_CAP));
    config.edge_base_width
        + edge.confidence * config.edge_confidence_width
        + evidence as f32 * config.edge_evidence_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, LayoutMode};
    use crate::ir::RelationRecord;
    use crate::layout::compute_layout;

    #[test]
    fn render_svg_basic() {
        let relations = vec![
            RelationRecord::new("r1", "Alice", "livesIn", "Paris", 0.9),
            RelationRecord::new("r2", "Bob <admin>", "worksAt", "ACME & Co", 0.6),
        ];
        let layout = compute_layout(&relations, &LayoutConfig::default());
        let svg = render_svg(&layout, &Theme::modern(), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Alice"));
        assert!(svg.contains("Bob &lt;admin&gt;"));
        assert!(svg.contains("ACME &amp; Co"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("stroke-opacity").count(), 2);
    }

    #[test]
    fn bipartite_edges_are_cubic() {
        let relations = vec![RelationRecord::new("r1", "a", "p", "b", 0.9)];
        let config = LayoutConfig {
            layout_mode: LayoutMode::Bipartite,
            ..Default::default()
        };
        let layout = compute_layout(&relations, &config);
        let svg = render_svg(&layout, &Theme::modern(), &RenderConfig::default());
        assert!(svg.contains(" C "));
    }

    #[test]
    fn labels_can_be_hidden() {
        let relations = vec![RelationRecord::new("r1", "a", "p", "b", 0.9)];
        let layout = compute_layout(&relations, &LayoutConfig::default());
        let config = RenderConfig {
            show_labels: false,
            arrowheads: false,
            ..Default::default()
        };
        let svg = render_svg(&layout, &Theme::dark(), &config);
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("marker-end"));
    }

    #[test]
    fn evidence_thickens_edges_up_to_a_cap() {
        let mut single = RelationRecord::new("r1", "a", "p", "b", 0.5);
        single.evidence_count = Some(1);
        let mut repeated = single.clone();
        repeated.evidence_count = Some(4);
        let mut flooded = single.clone();
        flooded.evidence_count = Some(500);

        let config = RenderConfig::default();
        let width_of = |record: &RelationRecord| {
            let layout = compute_layout(std::slice::from_ref(record), &LayoutConfig::default());
            edge_stroke_width(&layout.edges[0], &config)
        };
        let base = width_of(&single);
        assert_eq!(base, 1.0 + 0.5 * 1.6);
        assert!((width_of(&repeated) - base - 0.6).abs() < 1e-5);
        assert!((width_of(&flooded) - base - 1.6).abs() < 1e-5);

        let layout = compute_layout(&[repeated], &LayoutConfig::default());
        let svg = render_svg(&layout, &Theme::modern(), &config);
        assert!(svg.contains("stroke-width=\"2.40\""));
    }

    #[test]
    fn empty_layout_still_renders_a_canvas() {
        let layout = compute_layout(&[], &LayoutConfig::default());
        let svg = render_svg(&layout, &Theme::modern(), &RenderConfig::default());
        assert!(svg.contains("<rect"));
        assert!(!svg.contains("<circle"));
    }
}
