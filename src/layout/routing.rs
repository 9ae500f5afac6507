use crate::config::LayoutMode;

use super::Layout;

/// Share of the curvature used to displace the force-mode control point.
const FORCE_BOW_SCALE: f32 = 0.55;
/// Horizontal positions of the bipartite control points along the span.
const BIPARTITE_FIRST_CONTROL: f32 = 0.34;
const BIPARTITE_SECOND_CONTROL: f32 = 0.66;

pub type Point = (f32, f32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    Quadratic {
        from: Point,
        control: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        control1: Point,
        control2: Point,
        to: Point,
    },
}

impl EdgePath {
    pub fn from(&self) -> Point {
        match self {
            EdgePath::Quadratic { from, .. } | EdgePath::Cubic { from, .. } => *from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            EdgePath::Quadratic { to, .. } | EdgePath::Cubic { to, .. } => *to,
        }
    }

    /// Point on the curve at `t = 0.5`.
    pub fn midpoint(&self) -> Point {
        match *self {
            EdgePath::Quadratic { from, control, to } => (
                0.25 * from.0 + 0.5 * control.0 + 0.25 * to.0,
                0.25 * from.1 + 0.5 * control.1 + 0.25 * to.1,
            ),
            EdgePath::Cubic {
                from,
                control1,
                control2,
                to,
            } => (
                0.125 * from.0 + 0.375 * control1.0 + 0.375 * control2.0 + 0.125 * to.0,
                0.125 * from.1 + 0.375 * control1.1 + 0.375 * control2.1 + 0.125 * to.1,
            ),
        }
    }

    pub fn to_svg_path(&self) -> String {
        match self {
            EdgePath::Quadratic { from, control, to } => format!(
                "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
                from.0, from.1, control.0, control.1, to.0, to.1
            ),
            EdgePath::Cubic {
                from,
                control1,
                control2,
                to,
            } => format!(
                "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                from.0, from.1, control1.0, control1.1, control2.0, control2.1, to.0, to.1
            ),
        }
    }
}

/// Quadratic curve bowed sideways by `curvature * 0.55` along the unit normal
/// of the chord.
pub fn force_edge_path(from: Point, to: Point, curvature: f32) -> EdgePath {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };
    let bow = curvature * FORCE_BOW_SCALE;
    let mid_x = (from.0 + to.0) / 2.0;
    let mid_y = (from.1 + to.1) / 2.0;
    EdgePath::Quadratic {
        from,
        control: (mid_x + nx * bow, mid_y + ny * bow),
        to,
    }
}

/// Cubic S-curve for left-to-right column layouts.
pub fn bipartite_edge_path(from: Point, to: Point, curvature: f32) -> EdgePath {
    let span = to.0 - from.0;
    EdgePath::Cubic {
        from,
        control1: (from.0 + span * BIPARTITE_FIRST_CONTROL, from.1 + curvature),
        control2: (from.0 + span * BIPARTITE_SECOND_CONTROL, to.1 - curvature),
        to,
    }
}

pub fn edge_path(mode: LayoutMode, from: Point, to: Point, curvature: f32) -> EdgePath {
    match mode {
        LayoutMode::Force => force_edge_path(from, to, curvature),
        LayoutMode::Bipartite => bipartite_edge_path(from, to, curvature),
    }
}

/// Curves for every edge whose endpoints resolve, paired with the edge's
/// index in `layout.edges`.
pub fn route_edges(layout: &Layout) -> Vec<(usize, EdgePath)> {
    layout
        .edges
        .iter()
        .enumerate()
        .filter_map(|(idx, edge)| {
            let source = layout.node(&edge.source)?;
            let target = layout.node(&edge.target)?;
            let path = edge_path(
                layout.mode,
                (source.x, source.y),
                (target.x, target.y),
                edge.curvature,
            );
            Some((idx, path))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Edge;

    #[test]
    fn force_path_bows_along_the_normal() {
        let path = force_edge_path((0.0, 0.0), (100.0, 0.0), 20.0);
        let EdgePath::Quadratic { control, .. } = path else {
            panic!("expected quadratic");
        };
        assert_eq!(control, (50.0, 11.0));

        let flipped = force_edge_path((0.0, 0.0), (100.0, 0.0), -20.0);
        let EdgePath::Quadratic { control, .. } = flipped else {
            panic!("expected quadratic");
        };
        assert_eq!(control, (50.0, -11.0));
    }

    #[test]
    fn coincident_endpoints_stay_finite() {
        let path = force_edge_path((10.0, 10.0), (10.0, 10.0), 45.5);
        let EdgePath::Quadratic { control, .. } = path else {
            panic!("expected quadratic");
        };
        assert_eq!(control, (10.0, 10.0));
        assert!(!path.to_svg_path().contains("NaN"));
    }

    #[test]
    fn bipartite_path_uses_horizontal_thirds() {
        let path = bipartite_edge_path((100.0, 50.0), (300.0, 150.0), 13.0);
        assert_eq!(
            path,
            EdgePath::Cubic {
                from: (100.0, 50.0),
                control1: (100.0 + 200.0 * 0.34, 63.0),
                control2: (100.0 + 200.0 * 0.66, 137.0),
                to: (300.0, 150.0),
            }
        );
        assert!(path.to_svg_path().starts_with("M 100.00 50.00 C "));
    }

    #[test]
    fn midpoint_of_straight_curves() {
        let quad = force_edge_path((0.0, 0.0), (10.0, 0.0), 0.0);
        assert_eq!(quad.midpoint(), (5.0, 0.0));
        let cubic = bipartite_edge_path((0.0, 0.0), (10.0, 10.0), 0.0);
        let (x, y) = cubic.midpoint();
        assert!((x - 5.0).abs() < 1e-5);
        assert!((y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn unresolved_edges_are_skipped() {
        let mut layout = Layout::empty(LayoutMode::Force, 800.0, 400.0);
        layout.edges.push(Edge {
            relation_id: "r1".to_string(),
            source: "s:missing".to_string(),
            target: "o:missing".to_string(),
            predicate: "p".to_string(),
            color: "#000".to_string(),
            curvature: 0.0,
            confidence: 1.0,
            subject_label: "missing".to_string(),
            object_label: "missing".to_string(),
            evidence_count: None,
        });
        assert!(route_edges(&layout).is_empty());
    }
}
