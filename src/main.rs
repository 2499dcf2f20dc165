//! Tileworld headless runner.
//!
//! Builds a [`Game`] from `config.ini` (or defaults), runs setup, feeds it a
//! fixed frame delta for the configured number of frames and quits.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 120 --frame-ms 16
//! ```

use clap::Parser;
use std::path::PathBuf;

use tileworld::game::Game;
use tileworld::resources::gameconfig::GameConfig;
use tileworld::resources::walkable::Walkable;
use tileworld::resources::worldtime::WorldTime;

/// Tileworld headless runner
#[derive(Parser)]
#[command(version, about = "Runs the tile world without a window and logs what happens.")]
struct Cli {
    /// INI file to read settings from (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate. Overrides [timing] frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Milliseconds per simulated frame. Overrides [timing] frame_ms.
    #[arg(long, value_name = "MS")]
    frame_ms: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
        config = GameConfig::with_path(config.config_path);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(frame_ms) = cli.frame_ms {
        config.frame_ms = frame_ms;
    }

    let frames = config.frames;
    let frame_ms = config.frame_ms;
    log::info!(
        "Starting tileworld: {} tiles ({} px), {} frames of {}ms",
        config.grid_size(),
        config.pixel_size(),
        frames,
        frame_ms
    );

    let mut game = Game::new(config);
    game.setup();
    for _ in 0..frames {
        game.tick(frame_ms);
    }
    game.quit();

    let world = game.world();
    let time = world.resource::<WorldTime>();
    let walkable = world.get_resource::<Walkable>().map_or(0, |w| w.0.len());
    log::info!(
        "Finished after {} frames, {:.1}ms simulated, state {:?}, {} loops, {} walkable tiles",
        time.frame_count,
        time.elapsed,
        game.state(),
        game.loop_count(),
        walkable
    );
}
