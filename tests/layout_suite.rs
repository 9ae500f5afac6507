use std::path::Path;

use relation_graph_renderer::layout::{NodeKind, route_edges};
use relation_graph_renderer::{
    LayoutConfig, LayoutMode, RelationRecord, RenderConfig, Theme, compute_layout,
    parse_relations, render_svg,
};

fn load_fixture(rel: &str) -> Vec<RelationRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_relations(&input).expect("fixture parse failed")
}

fn config_for(mode: LayoutMode) -> LayoutConfig {
    LayoutConfig {
        layout_mode: mode,
        ..Default::default()
    }
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert!(!svg.contains("NaN"), "{fixture}: NaN coordinate");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = ["empty.json", "single.json", "profile_page.json", "messy.json5"];

    for rel in fixtures {
        let relations = load_fixture(rel);
        for mode in [LayoutMode::Force, LayoutMode::Bipartite] {
            let layout = compute_layout(&relations, &config_for(mode));
            let svg = render_svg(&layout, &Theme::modern(), &RenderConfig::default());
            assert_valid_svg(&svg, rel);
            assert_eq!(route_edges(&layout).len(), layout.edges.len(), "{rel}");
        }
    }
}

#[test]
fn identical_inputs_give_identical_coordinates() {
    let relations = load_fixture("profile_page.json");
    for mode in [LayoutMode::Force, LayoutMode::Bipartite] {
        let first = compute_layout(&relations, &config_for(mode));
        let second = compute_layout(&relations, &config_for(mode));
        assert_eq!(first.nodes.len(), second.nodes.len());
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.x.to_bits(), b.x.to_bits(), "{} x", a.id);
            assert_eq!(a.y.to_bits(), b.y.to_bits(), "{} y", a.id);
        }
    }
}

#[test]
fn force_layout_respects_padding() {
    let relations = load_fixture("profile_page.json");
    for (width, height) in [(720.0, 360.0), (1280.0, 900.0), (0.0, 0.0)] {
        let config = LayoutConfig {
            width,
            height,
            ..Default::default()
        };
        let layout = compute_layout(&relations, &config);
        for node in &layout.nodes {
            assert!(node.x >= 55.0 && node.x <= layout.width - 55.0, "{}", node.id);
            assert!(node.y >= 55.0 && node.y <= layout.height - 55.0, "{}", node.id);
        }
    }
}

#[test]
fn profile_page_graph_shape() {
    let relations = load_fixture("profile_page.json");
    assert_eq!(relations.len(), 10);
    assert_eq!(relations[0].memory_type.as_deref(), Some("profile"));
    assert_eq!(relations[0].evidence_count, Some(4));

    let layout = compute_layout(&relations, &LayoutConfig::default());
    // rel-009 sits below the default threshold.
    assert_eq!(layout.edges.len(), 9);
    assert_eq!(layout.nodes.len(), 14);

    let degree_sum: usize = layout.nodes.iter().map(|n| n.degree).sum();
    assert_eq!(degree_sum, 2 * layout.edges.len());

    let subject = layout.node("s:Shanghai").unwrap();
    let object = layout.node("o:Shanghai").unwrap();
    assert_eq!(subject.kind, NodeKind::Subject);
    assert_eq!(object.kind, NodeKind::Object);
    assert_eq!(object.degree, 2);

    // Strongest relation first.
    assert_eq!(layout.edges[0].relation_id, "rel-010");

    let employer = layout.node("o:a mid-sized logistics company in the Pudong district").unwrap();
    assert_eq!(employer.display_label.chars().count(), 28);
    assert!(employer.display_label.ends_with('…'));
}

#[test]
fn messy_rows_are_coerced_not_rejected() {
    let relations = load_fixture("messy.json5");
    assert_eq!(relations.len(), 6);
    assert_eq!(relations[0].relation_id, "1");
    assert_eq!(relations[0].confidence, 0.8);

    let layout = compute_layout(&relations, &LayoutConfig::default());
    assert_eq!(layout.edges.len(), 3);
    assert!(layout.node("s:Alice").is_some());
    assert!(layout.node("o:Alice").is_some());
    assert_eq!(layout.node("o:Bob").unwrap().degree, 2);

    let everything = compute_layout(
        &relations,
        &LayoutConfig {
            min_confidence: 0.0,
            ..Default::default()
        },
    );
    assert_eq!(everything.edges.len(), 6);
    assert!(everything.node("s:(empty)").is_some());
    let dave = everything.node("s:Dave").unwrap();
    assert_eq!(dave.avg_confidence, 0.0);
}

#[test]
fn repeated_pair_keeps_every_relation_up_to_the_cap() {
    let relations: Vec<RelationRecord> = (0..500)
        .map(|i| {
            RelationRecord::new(
                format!("r{i}"),
                "Alice",
                "livesIn",
                "Paris",
                0.26 + (i % 74) as f32 * 0.01,
            )
        })
        .collect();

    for cap in [140usize, 500, 1000] {
        let config = LayoutConfig {
            max_relations: cap,
            ..Default::default()
        };
        let layout = compute_layout(&relations, &config);
        let expected = cap.min(500);
        assert_eq!(layout.edges.len(), expected);
        assert_eq!(layout.nodes.len(), 2);
        for node in &layout.nodes {
            assert_eq!(node.degree, expected);
        }
    }
}

#[test]
fn single_subject_bipartite_has_no_jitter() {
    let relations = load_fixture("single.json");
    let config = LayoutConfig {
        layout_mode: LayoutMode::Bipartite,
        width: 900.0,
        height: 500.0,
        ..Default::default()
    };
    let layout = compute_layout(&relations, &config);
    let alice = layout.node("s:Alice").unwrap();
    let paris = layout.node("o:Paris").unwrap();
    let middle = (58.0 + (500.0 - 44.0)) / 2.0;
    assert_eq!((alice.x, alice.y), (0.28 * 900.0, middle));
    assert_eq!((paris.x, paris.y), (0.72 * 900.0, middle));
}

#[test]
fn relation_cap_above_a_thousand_is_honored() {
    let relations: Vec<RelationRecord> = (0..1500)
        .map(|i| RelationRecord::new(format!("r{i}"), "Alice", "knows", "Bob", 0.9))
        .collect();
    let config = LayoutConfig {
        layout_mode: LayoutMode::Bipartite,
        max_relations: 2000,
        ..Default::default()
    };
    let layout = compute_layout(&relations, &config);
    assert_eq!(layout.edges.len(), 1500);
    assert_eq!(layout.node("s:Alice").unwrap().degree, 1500);
}
