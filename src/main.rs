use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use drawer::encoding::{default_output_path, save_png};
use drawer::schema::load_config;
use drawer::surface::PixmapSurface;
use drawer::Scene;

#[derive(Debug, Parser)]
#[command(name = "drawer")]
#[command(about = "Procedural pen-plotter: agents tracing rotating 3D skeletons")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a scene to an accumulated PNG canvas.
    Render {
        config: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        /// Number of frames to simulate.
        #[arg(long, default_value_t = 600)]
        frames: u32,
        /// Trigger a shape switch every N frames.
        #[arg(long)]
        switch_every: Option<u32>,
        /// Re-roll every pen every N frames.
        #[arg(long)]
        randomize_pens_every: Option<u32>,
        /// Start in fast mode.
        #[arg(long)]
        fast: bool,
    },
    /// Validate a scene config without rendering.
    Check {
        config: PathBuf,
    },
}

fn version_string() -> String {
    match option_env!("DRAWER_GIT_HASH") {
        Some(hash) => format!("{} ({hash})", env!("CARGO_PKG_VERSION")),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            output,
            frames,
            switch_every,
            randomize_pens_every,
            fast,
        } => run_render(
            &config,
            output,
            frames,
            switch_every,
            randomize_pens_every,
            fast,
        ),
        Commands::Check { config } => run_check(&config),
    }
}

fn run_check(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    println!(
        "OK: {} ({}x{}, {} dots, {} fps, shape {}, seed {})",
        config_path.display(),
        config.canvas.width,
        config.canvas.height,
        config.dots,
        config.fps,
        config.shape.label(),
        config.seed
    );
    Ok(())
}

fn run_render(
    config_path: &Path,
    output: Option<PathBuf>,
    frames: u32,
    switch_every: Option<u32>,
    randomize_pens_every: Option<u32>,
    fast: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut scene = Scene::new(&config);
    if fast {
        scene.set_fast_mode(true);
    }

    let mut surface = PixmapSurface::new(config.canvas.width, config.canvas.height)?;
    let frame_ms = 1000.0 / config.fps as f64;

    for frame in 0..frames {
        let now_ms = frame as f64 * frame_ms;

        if let Some(every) = switch_every {
            if frame > 0 && frame % every == 0 {
                scene.request_shape_switch(now_ms);
            }
        }
        if let Some(every) = randomize_pens_every {
            if frame > 0 && frame % every == 0 {
                scene.randomize_pens();
            }
        }

        scene.tick(now_ms, &mut surface);

        if frame % config.fps == 0 {
            eprintln!("[drawer] frame {}/{}", frame + 1, frames);
        }
    }

    let output = output.unwrap_or_else(default_output_path);
    save_png(surface.pixmap(), &output)?;
    println!("Wrote {}", output.display());
    Ok(())
}
