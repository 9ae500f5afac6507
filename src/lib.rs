#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LayoutMode, RenderConfig};
pub use ir::{InputError, RelationRecord, parse_relations};
pub use layout::{Layout, compute_layout};
pub use layout_dump::LayoutDump;
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to turn relation rows into an SVG in one call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn modern() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            ..Self::default()
        }
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }
}

pub fn render_relations(relations: &[RelationRecord], options: &RenderOptions) -> String {
    let layout = compute_layout(relations, &options.layout);
    render_svg(&layout, &options.theme, &options.render)
}

/// Parses a JSON relation document and renders it.
pub fn render_with_options(input: &str, options: RenderOptions) -> Result<String, InputError> {
    let relations = parse_relations(input)?;
    Ok(render_relations(&relations, &options))
}
