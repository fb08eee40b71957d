//! Seenmap CLI - render a save's explored overmap data as a tiled PNG.

mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use seenmap::config::{DEFAULT_LAYER, DEFAULT_MAPX, DEFAULT_MAPY, DEFAULT_SCALE};
use seenmap::{Compositor, ImageSurface, RegionIndex, RenderConfig};

use crate::error::CliError;

/// Render a save's explored overmap data as a tiled PNG.
///
/// Scans the save directory for per-region exploration logs, decodes the
/// requested layer from each, and composites everything onto one canvas
/// with a fixed-size tile per region.
#[derive(Debug, Parser)]
#[command(name = "seenmap", version, about)]
struct Cli {
    /// Save directory containing the region log files
    save_dir: PathBuf,

    /// Output PNG path
    output: PathBuf,

    /// Region width in cells
    #[arg(short = 'x', long, default_value_t = DEFAULT_MAPX, value_parser = clap::value_parser!(u32).range(1..))]
    mapx: u32,

    /// Region height in cells
    #[arg(short = 'y', long, default_value_t = DEFAULT_MAPY, value_parser = clap::value_parser!(u32).range(1..))]
    mapy: u32,

    /// Map layer to render
    #[arg(short = 'l', long, default_value_t = DEFAULT_LAYER)]
    layer: i32,

    /// Pixels per cell
    #[arg(short = 's', long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Skip the region grid overlay
    #[arg(long)]
    no_grid: bool,

    /// Skip the world-origin marker
    #[arg(long)]
    no_origin: bool,

    /// Draw note markers
    #[arg(short = 'n', long)]
    notes: bool,

    /// Enable debug output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Diagnostics go to stderr so the canvas path on stdout stays clean for
/// scripting. RUST_LOG overrides the verbose flag when set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "seenmap=debug" } else { "seenmap=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = RenderConfig::new()
        .with_map_size(cli.mapx, cli.mapy)
        .with_layer(cli.layer)
        .with_scale(cli.scale)
        .with_grid(!cli.no_grid)
        .with_origin(!cli.no_origin)
        .with_notes(cli.notes);

    let index = RegionIndex::discover(&cli.save_dir)?;

    let compositor = Compositor::new(&config);
    let (width, height) = compositor.canvas_size(&index);
    let extent = index.extent();
    tracing::info!(
        regions = index.len(),
        grid_width = extent.width(),
        grid_height = extent.height(),
        canvas_width = width,
        canvas_height = height,
        "Discovered region logs"
    );

    let mut surface = ImageSurface::new(width, height, compositor.palette().background);
    let stats = compositor.render(&index, &mut surface)?;

    surface.into_image().save(&cli.output)?;

    println!(
        "Rendered {} regions ({} boxes, {} notes) to {}",
        stats.regions,
        stats.boxes,
        stats.notes,
        cli.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_args_are_consistent() {
        Cli::command().debug_assert();
    }

    fn base_cli(save_dir: PathBuf, output: PathBuf) -> Cli {
        Cli {
            save_dir,
            output,
            mapx: 4,
            mapy: 4,
            layer: 0,
            scale: 2,
            no_grid: false,
            no_origin: false,
            notes: false,
            verbose: false,
        }
    }

    #[test]
    fn test_run_writes_the_png() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("#T=.seen.0.0"), "L 0\n1 16\n0\n0\n").unwrap();
        let output = dir.path().join("map.png");

        run(&base_cli(dir.path().to_path_buf(), output.clone())).unwrap();

        let image = image::open(&output).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (8, 8));
    }

    #[test]
    fn test_run_without_regions_writes_no_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("map.png");

        let err = run(&base_cli(dir.path().to_path_buf(), output.clone())).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!output.exists());
    }
}
