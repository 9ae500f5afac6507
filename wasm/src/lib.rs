use relation_graph_renderer::{
    LayoutDump, LayoutMode, RenderOptions, Theme, compute_layout, parse_relations,
    render_with_options,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelationGraphOptions {
    theme: Option<String>,
    layout_mode: Option<String>,
    min_confidence: Option<f32>,
    max_relations: Option<usize>,
    width: Option<f32>,
    height: Option<f32>,
    show_labels: Option<bool>,
}

fn parse_options(options_json: Option<String>) -> Result<RelationGraphOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<RelationGraphOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(RelationGraphOptions::default()),
    }
}

fn build_render_options(options: RelationGraphOptions) -> RenderOptions {
    let mut render_options = RenderOptions::modern();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::from_name) {
        render_options.theme = theme;
    }

    if let Some(mode) = options.layout_mode.as_deref().and_then(LayoutMode::from_token) {
        render_options.layout.layout_mode = mode;
    }
    if let Some(min_confidence) = options.min_confidence {
        render_options.layout.min_confidence = min_confidence;
    }
    if let Some(max_relations) = options.max_relations {
        render_options.layout.max_relations = max_relations;
    }
    if let Some(width) = options.width {
        render_options.layout.width = width;
    }
    if let Some(height) = options.height {
        render_options.layout.height = height;
    }
    if let Some(show_labels) = options.show_labels {
        render_options.render.show_labels = show_labels;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_relation_graph_svg(
    relations_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_with_options(relations_json, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Returns the computed layout (nodes, edges, node index, edge paths) as JSON
/// for hosts that draw the graph themselves.
#[wasm_bindgen]
pub fn compute_relation_layout_json(
    relations_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    let relations =
        parse_relations(relations_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let layout = compute_layout(&relations, &render_options.layout);
    LayoutDump::from_layout(&layout)
        .to_json()
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
