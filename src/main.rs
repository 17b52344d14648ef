//! Headless model viewer
//!
//! Imports model files into a scene without opening a window, prints what was loaded
//! and optionally picks the model under a viewport pixel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use model_viewer::{
    app::ViewerApp,
    config::ViewerConfig,
    gfx::{resources::HeadlessBackend, BoundingBox},
    importers::ImportOptions,
};

#[derive(Parser, Debug)]
#[command(name = "model-viewer")]
#[command(about = "Import OBJ models into a scene and pick them from the viewport")]
#[command(version)]
struct Args {
    /// Model files to import
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "800x600", value_parser = parse_viewport)]
    viewport: (u32, u32),

    /// Pick the model under this pixel (origin top-left)
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pick: Option<Vec<f32>>,

    /// Reject faces with more than three corners instead of triangulating them
    #[arg(long)]
    no_triangulate: bool,

    /// Skip checking that referenced texture files exist
    #[arg(long)]
    skip_texture_check: bool,
}

fn parse_viewport(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid viewport dimension '{part}': {err}"))
    };
    Ok((parse(width)?, parse(height)?))
}

/// Box corners as plain arrays for printing.
fn extent(bounds: &BoundingBox) -> ([f32; 3], [f32; 3]) {
    let min: [f32; 3] = bounds.min().into();
    let max: [f32; 3] = bounds.max().into();
    (min, max)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let (width, height) = args.viewport;
    let config = ViewerConfig::default()
        .with_viewport(width, height)
        .with_import_options(ImportOptions {
            triangulate: !args.no_triangulate,
        });
    let backend = HeadlessBackend::new().with_texture_file_check(!args.skip_texture_check);
    let mut app = ViewerApp::new(config, backend);

    for path in &args.files {
        app.import_model(path)
            .with_context(|| format!("failed to import {}", path.display()))?;
    }

    let stats = app.scene().get_statistics();
    println!(
        "{} model(s), {} mesh(es), {} material(s), {} triangles, {} vertices",
        stats.model_count,
        stats.mesh_count,
        stats.material_count,
        stats.total_triangles,
        stats.total_vertices
    );
    for model in app.scene().models() {
        let (min, max) = extent(&model.world_bounds());
        println!("  {}: min {min:?} max {max:?}", model.name());
    }

    if let Some(pick) = args.pick.as_deref() {
        let [x, y] = pick else {
            anyhow::bail!("--pick takes exactly two values");
        };
        match app.scene().pick_index(*x, *y, width, height) {
            Some(hit) => println!(
                "picked '{}' at distance {:.3}",
                app.scene().models()[hit.model_index].name(),
                hit.distance
            ),
            None => println!("nothing under ({x}, {y})"),
        }
    }

    let backend = app.shutdown();
    log::debug!(
        "shut down with {} live buffer(s), {} live texture(s)",
        backend.live_buffers(),
        backend.live_textures()
    );
    Ok(())
}
