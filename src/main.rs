// src/main.rs

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chaos_game::hooks::{finish, AsciiPreview, KeepPrompt, PostProcessHook, PREVIEW_MAX_SIDE};
use chaos_game::{ChaosGame, ImageEncoder, Result, RunConfig};
use clap::Parser;

/// Plays the chaos game on a regular polygon and writes the density as a PPM image.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON run configuration; when given, the run flags below are ignored
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of polygon vertices
    #[arg(short = 'n', long, default_value_t = 4)]
    degree: usize,

    /// Percent of the way to jump toward the chosen vertex
    #[arg(short, long, default_value_t = 50.0, allow_negative_numbers = true)]
    percent: f64,

    #[arg(long, default_value_t = 500)]
    width: usize,

    #[arg(long, default_value_t = 500)]
    height: usize,

    #[arg(short, long, default_value_t = 10_000_000)]
    iterations: u64,

    /// Allow the same vertex to be chosen twice in a row
    #[arg(long)]
    allow_same_vertex: bool,

    /// After a repeat, skip the repeated vertex and its neighbours (needs --allow-same-vertex)
    #[arg(long)]
    no_neighbor_if_repeat: bool,

    /// Add the polygon centre as an extra vertex
    #[arg(long)]
    centroid: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Directory the image is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Print an ASCII rendering of the grid
    #[arg(long)]
    preview: bool,

    /// Ask whether to keep the image once it is written
    #[arg(long)]
    confirm: bool,

    /// Log progress (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        if let Some(path) = &self.config {
            return RunConfig::load(path);
        }
        Ok(RunConfig {
            polygon_degree: self.degree,
            percent_to_next_point: self.percent,
            grid_width: self.width,
            grid_height: self.height,
            allow_same_vertex_in_a_row: self.allow_same_vertex,
            no_neighbor_if_repeat: self.no_neighbor_if_repeat,
            include_centroid_vertex: self.centroid,
            iterations: self.iterations,
            seed: self.seed,
        })
    }

    fn hooks(&self, config: &RunConfig) -> Vec<Box<dyn PostProcessHook>> {
        let mut hooks: Vec<Box<dyn PostProcessHook>> = Vec::new();
        if self.preview {
            if config.grid_width > PREVIEW_MAX_SIDE || config.grid_height > PREVIEW_MAX_SIDE {
                log::warn!(
                    "preview of a {}x{} grid will not fit a terminal",
                    config.grid_width,
                    config.grid_height
                );
            }
            hooks.push(Box::new(AsciiPreview::new(std::io::stdout())));
        }
        if self.confirm {
            hooks.push(Box::new(KeepPrompt::new(std::io::stdin().lock(), std::io::stdout())));
        }
        hooks
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.run_config()?;
    let game = ChaosGame::new(config.clone())?;

    // must be opened before iterating
    let path = config.output_path(&args.output_dir);
    let mut out = ImageEncoder::create(&path)?;
    log::info!("writing {}", path.display());
    log::info!("{config:?}");

    let grid = game.run();

    ImageEncoder::encode(&grid, &mut out)?;
    out.flush()?;
    drop(out);
    log::info!("done: {} visits recorded", grid.total());

    finish(&mut args.hooks(&config), &grid, &path)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
