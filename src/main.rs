mod audio;
mod config;
mod controls;
mod game;
mod geometry;
mod level;
mod logging;
mod player;
mod render;
mod scan;
mod types;

use clap::Parser;
use log::{LevelFilter, info};
use macroquad::prelude::*;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maze width in cells.
    #[arg(long, default_value_t = config::DEFAULT_MAZE_WIDTH)]
    maze_width: u32,

    /// Maze height in cells.
    #[arg(long, default_value_t = config::DEFAULT_MAZE_HEIGHT)]
    maze_height: u32,

    /// Seed for maze generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "level,scan,audio")
    /// Available topics: level, scan, audio
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Headphones Recommended".to_owned(),
        window_width: config::SCREEN_WIDTH,
        window_height: config::SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!(
        "Initializing {}x{} maze navigation...",
        args.maze_width, args.maze_height
    );

    let mut game = game::Game::new(args.maze_width, args.maze_height, args.seed)
        .await
        .expect("Failed to create game");

    let mut renderer = render::Renderer::new();
    game.run(&mut renderer).await;
}
