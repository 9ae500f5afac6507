use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;
pub const DEFAULT_MAX_RELATIONS: usize = 140;
pub const DEFAULT_WIDTH: f32 = 960.0;
pub const DEFAULT_HEIGHT: f32 = 640.0;
pub const MIN_VIEWPORT_WIDTH: f32 = 720.0;
pub const MIN_VIEWPORT_HEIGHT: f32 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Force,
    Bipartite,
}

impl LayoutMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "force" => Some(Self::Force),
            "bipartite" => Some(Self::Bipartite),
            _ => None,
        }
    }
}

/// Physical constants of the force-directed mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    pub min_width: f32,
    pub min_height: f32,
    pub ideal_length_scale: f32,
    pub ideal_length_min: f32,
    pub ideal_length_max: f32,
    pub repulsion_scale: f32,
    /// Repulsion stops growing past this multiple of the ideal edge length.
    pub repulsion_range: f32,
    pub spring_k: f32,
    pub center_k: f32,
    pub damping: f32,
    pub padding: f32,
    pub iteration_budget: f32,
    pub iteration_base: f32,
    pub min_iterations: usize,
    pub max_iterations: usize,
    pub cooling_span: f32,
    pub min_alpha: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            min_width: 500.0,
            min_height: 300.0,
            ideal_length_scale: 0.85,
            ideal_length_min: 70.0,
            ideal_length_max: 220.0,
            repulsion_scale: 1.4,
            repulsion_range: 2.0,
            spring_k: 0.05,
            center_k: 0.018,
            damping: 0.82,
            padding: 55.0,
            iteration_budget: 14000.0,
            iteration_base: 60.0,
            min_iterations: 80,
            max_iterations: 320,
            cooling_span: 0.85,
            min_alpha: 0.04,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BipartiteConfig {
    /// Column centers as a fraction of the viewport width.
    pub subject_column: f32,
    pub object_column: f32,
    pub top: f32,
    pub bottom_margin: f32,
    pub offset_buckets: u32,
    pub offset_step: f32,
    pub wobble_buckets: u32,
    pub wobble_step: f32,
}

impl Default for BipartiteConfig {
    fn default() -> Self {
        Self {
            subject_column: 0.28,
            object_column: 0.72,
            top: 58.0,
            bottom_margin: 44.0,
            offset_buckets: 19,
            offset_step: 1.8,
            wobble_buckets: 13,
            wobble_step: 2.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub min_confidence: f32,
    pub max_relations: usize,
    pub layout_mode: LayoutMode,
    pub width: f32,
    pub height: f32,
    pub force: ForceConfig,
    pub bipartite: BipartiteConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_relations: DEFAULT_MAX_RELATIONS,
            layout_mode: LayoutMode::Force,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            force: ForceConfig::default(),
            bipartite: BipartiteConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Returns a copy with every user-facing knob clamped into its documented
    /// range. Non-finite values fall back to the defaults.
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        config.min_confidence = if self.min_confidence.is_finite() {
            self.min_confidence.clamp(0.0, 1.0)
        } else {
            DEFAULT_MIN_CONFIDENCE
        };
        config.max_relations = self.max_relations.max(1);
        config.width = finite_or(self.width, DEFAULT_WIDTH).max(MIN_VIEWPORT_WIDTH);
        config.height = finite_or(self.height, DEFAULT_HEIGHT).max(MIN_VIEWPORT_HEIGHT);
        config
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub show_labels: bool,
    pub label_gap: f32,
    pub edge_base_width: f32,
    pub edge_confidence_width: f32,
    /// Extra stroke per corroborating observation beyond the first.
    pub edge_evidence_width: f32,
    pub arrowheads: bool,
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_labels: true,
            label_gap: 4.0,
            edge_base_width: 1.0,
            edge_confidence_width: 1.6,
            edge_evidence_width: 0.2,
            arrowheads: true,
            png_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    subject_fill: Option<String>,
    object_fill: Option<String>,
    node_stroke: Option<String>,
    label_color: Option<String>,
    edge_opacity: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("unknown theme `{theme_name}`, keeping the default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.subject_fill {
            config.theme.subject_fill = v;
        }
        if let Some(v) = vars.object_fill {
            config.theme.object_fill = v;
        }
        if let Some(v) = vars.node_stroke {
            config.theme.node_stroke = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.edge_opacity {
            config.theme.edge_opacity = v.clamp(0.0, 1.0);
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }

    Ok(config)
}
