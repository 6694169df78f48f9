// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the airport delay bubble map.
//!
//! ```text
//! delaymap_demo svg --data airport_summary.csv --geo us-states.json --category Weather --scale cubed --out weather.svg
//! delaymap_demo html --data airport_summary.csv --geo us-states.json --out delays.html
//! ```

mod html;
mod map;
mod svg;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use delaymap_encoding::{
    CategoryId, EncodingConfig, EncodingEngine, Mark, ScaleKind, Scene, Selection,
};
use delaymap_geo::{AlbersUsa, Boundary, load_boundaries};
use delaymap_io::{LoaderConfig, load_dataset};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::map::{FRAME, MapLayout, captions, resolve_category};

#[derive(Debug, Parser)]
#[command(version, about = "Airport delay bubble map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one selection as a standalone SVG.
    Svg {
        #[command(flatten)]
        input: InputArgs,
        /// Delay category to encode; defaults to the first configured category.
        #[arg(long)]
        category: Option<String>,
        /// Radius curvature.
        #[arg(long, default_value = "area", value_parser = parse_scale)]
        scale: ScaleKind,
        /// Output file.
        #[arg(long, default_value = "delaymap.svg")]
        out: PathBuf,
    },
    /// Render every category and scale into one page with radio-button selectors.
    Html {
        #[command(flatten)]
        input: InputArgs,
        /// Output file.
        #[arg(long, default_value = "delaymap.html")]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Airport delay table (CSV).
    #[arg(long)]
    data: PathBuf,
    /// US boundaries (GeoJSON); the map is drawn without a base layer when omitted.
    #[arg(long)]
    geo: Option<PathBuf>,
    /// Column mapping (JSON object with `id_column`, `lon_column`, `lat_column`, `categories`).
    #[arg(long)]
    columns: Option<PathBuf>,
    /// Largest bubble radius.
    #[arg(long, default_value_t = delaymap_encoding::DEFAULT_MAX_RADIUS)]
    max_radius: f64,
    /// Number of equal steps between the smallest and largest legend value.
    #[arg(long, default_value_t = delaymap_encoding::DEFAULT_LEGEND_DIVISIONS)]
    legend_steps: usize,
}

fn parse_scale(s: &str) -> Result<ScaleKind, String> {
    ScaleKind::from_label(s)
        .ok_or_else(|| format!("expected one of area, squared, cubed; got `{s}`"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Svg {
            input,
            category,
            scale,
            out,
        } => render_svg(&input, category.as_deref(), scale, &out),
        Command::Html { input, out } => render_html(&input, &out),
    }
}

/// A loaded engine plus the projected layout of its dataset.
#[derive(Debug)]
struct Session {
    engine: EncodingEngine,
    layout: MapLayout,
}

fn open_session(input: &InputArgs, category: Option<&str>, scale: ScaleKind) -> Result<Session> {
    let loader = match &input.columns {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<LoaderConfig>(&text)
                .with_context(|| format!("parsing column mapping {}", path.display()))?
        }
        None => LoaderConfig::default(),
    };
    let dataset = load_dataset(&input.data, &loader)
        .with_context(|| format!("loading {}", input.data.display()))?;
    let boundaries: Vec<Boundary> = match &input.geo {
        Some(path) => {
            load_boundaries(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Vec::new(),
    };

    let category = match category {
        Some(name) => resolve_category(&dataset, name)?,
        None => CategoryId(0),
    };
    let layout = MapLayout::new(&dataset, &boundaries, &AlbersUsa::default());

    let config = EncodingConfig::default()
        .with_max_radius(input.max_radius)
        .with_legend_divisions(input.legend_steps);
    let mut engine = EncodingEngine::new(config);
    engine
        .load(dataset, Selection::new(category, scale))
        .context("encoding the initial selection")?;
    Ok(Session { engine, layout })
}

fn render_svg(
    input: &InputArgs,
    category: Option<&str>,
    scale: ScaleKind,
    out: &Path,
) -> Result<()> {
    let session = open_session(input, category, scale)?;
    let (Some(dataset), Some(encoding)) = (session.engine.dataset(), session.engine.encoding())
    else {
        anyhow::bail!("engine is not ready after load");
    };

    let mut marks: Vec<Mark> = session.layout.base_marks().to_vec();
    marks.extend(captions());
    marks.extend(session.layout.selection_marks(dataset, encoding));
    let mut scene = Scene::new();
    scene.tick(marks);

    let doc = svg::document(&scene.ordered(), FRAME);
    write_output(out, &doc)
}

fn render_html(input: &InputArgs, out: &Path) -> Result<()> {
    let mut session = open_session(input, None, ScaleKind::Area)?;
    let categories = session
        .engine
        .dataset()
        .map(|d| d.categories().to_vec())
        .unwrap_or_default();

    let mut base = Scene::new();
    base.tick(session.layout.base_marks().to_vec());
    let base_marks = base.ordered();

    let mut layer = Scene::new();
    let mut variants = Vec::new();
    let mut view_box = svg::union(Some(FRAME), svg::view_box(&base_marks));
    for category in 0..categories.len() {
        for (scale_index, scale) in ScaleKind::ALL.into_iter().enumerate() {
            let selection = Selection::new(CategoryId(category), scale);
            let encoding = session
                .engine
                .select(selection)
                .with_context(|| format!("encoding {} / {scale}", categories[category]))?
                .clone();
            let Some(dataset) = session.engine.dataset() else {
                anyhow::bail!("engine is not ready after load");
            };
            let diffs = layer.tick(session.layout.selection_marks(dataset, &encoding));
            debug!(
                category = %categories[category],
                %scale,
                changed = diffs.len(),
                reordered = layer.order_changed(),
                "re-encoded selection"
            );

            let marks = layer.ordered();
            view_box = svg::union(view_box, svg::view_box(&marks));
            let mut body = String::new();
            svg::write_marks(&mut body, &marks);
            variants.push(html::Variant {
                category,
                scale: scale_index,
                body,
            });
        }
    }

    let page = html::render_page(
        &categories,
        &base_marks,
        &variants,
        view_box.unwrap_or(FRAME),
    );
    write_output(out, &page)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
