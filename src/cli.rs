use crate::config::{Config, LayoutMode, load_config};
use crate::ir::parse_relations;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "relgraph",
    version,
    about = "Lay out subject-predicate-object relations and render them as SVG"
)]
pub struct Args {
    /// Input file (JSON relation rows) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format. Inferred from the output extension when omitted.
    #[arg(short = 'e', long = "outputFormat", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout algorithm
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<LayoutMode>,

    /// Drop relations below this confidence
    #[arg(long = "min-confidence")]
    pub min_confidence: Option<f32>,

    /// Keep at most this many relations
    #[arg(long = "max-relations")]
    pub max_relations: Option<usize>,

    /// Theme name (modern, dark)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = apply_overrides(load_config(args.config.as_deref())?, &args)?;

    let input = read_input(args.input.as_deref())?;
    let relations = parse_relations(&input)?;
    log::info!("read {} relation rows", relations.len());

    let layout = compute_layout(&relations, &config.layout);
    log::info!(
        "laid out {} nodes and {} edges ({:?})",
        layout.nodes.len(),
        layout.edges.len(),
        layout.mode
    );

    match resolve_format(args.output_format, args.output.as_deref()) {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &layout)?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_png(&svg, &output, &config)?;
        }
    }

    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(name) = args.theme.as_deref() {
        config.theme = Theme::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", name))?;
    }
    if let Some(mode) = args.mode {
        config.layout.layout_mode = mode;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.layout.min_confidence = min_confidence;
    }
    if let Some(max_relations) = args.max_relations {
        config.layout.max_relations = max_relations;
    }
    if let Some(width) = args.width {
        config.layout.width = width;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
    }
    Ok(config)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn resolve_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    let ext = output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => OutputFormat::Png,
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Svg,
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
