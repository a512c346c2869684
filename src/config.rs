//! Configuration constants for the maze navigation game.

use std::f64::consts::PI;

// Screen
pub const SCREEN_WIDTH: i32 = 1200;
pub const SCREEN_HEIGHT: i32 = 800;

// Maze
pub const DEFAULT_MAZE_WIDTH: u32 = 4; // Grid cells across
pub const DEFAULT_MAZE_HEIGHT: u32 = 4; // Grid cells down
pub const TARGET_RESAMPLE_LIMIT: u32 = 1000; // Bound on re-rolling a target cell equal to start

// Player
pub const MOVEMENT_SPEED: f64 = 3.0; // Pixels per tick
pub const TURNING_SPEED: f64 = 1.0 / (32.0 * PI); // Radians per tick
pub const BODY_RADIUS: f64 = 20.0; // Collision radius in pixels
pub const VIEW_CONE_HALF_ANGLE: f64 = PI / 5.0; // +/- from the facing direction
pub const VIEW_CONE_RADIUS_SCALE: f64 = 1.5; // Scaled by min(cell width, cell height) per level

// Objects
pub const OBSTACLE_RADIUS: f64 = 5.0;
pub const TARGET_RADIUS: f64 = 30.0;

// Audio
pub const MAX_VOLUME: f32 = 0.1; // Ceiling for every continuous tone
pub const AUDIO_MIX_INTERVAL_MS: f64 = 60.0; // Stereo mix recompute cadence
pub const SAMPLE_RATE: u32 = 44_100;
