use crate::audio::AudioManager;
use crate::config;
use crate::controls;
use crate::geometry::{Angle, PolarCoordinate};
use crate::level::{Level, Maze};
use crate::player::Player;
use crate::render::Renderer;
use crate::scan::{self, ScanVerdict};
use log::info;
use macroquad::prelude::{KeyCode, get_frame_time, is_key_down, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
    LevelComplete,
}

/// The Game struct encapsulates the level, the player, and the audio
/// state for one run of the maze.
pub struct Game {
    pub level: Level,
    pub player: Player,
    audio: AudioManager,
    phase: GamePhase,
    mix_timer_ms: f64,
}

impl Game {
    /// Generate a level and place the player at its start cell.
    pub async fn new(
        maze_width: u32,
        maze_height: u32,
        seed: Option<u64>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let maze = Maze::generate(maze_width, maze_height, &mut rng)?;
        let level = Level::build(
            maze,
            config::SCREEN_WIDTH as f64,
            config::SCREEN_HEIGHT as f64,
            config::OBSTACLE_RADIUS,
        )?;

        let player = Player::new(
            level.start,
            Angle::new(FRAC_PI_2),
            (config::SCREEN_WIDTH as f64, config::SCREEN_HEIGHT as f64),
            PolarCoordinate::new(Angle::new(config::VIEW_CONE_HALF_ANGLE), level.view_radius),
        );

        let mut audio = AudioManager::new();
        audio.load().await;
        audio.start();

        info!(
            "Level ready: {} obstacles, viewing radius {:.0}",
            level.obstacles.len(),
            level.view_radius
        );

        Ok(Game {
            level,
            player,
            audio,
            phase: GamePhase::Playing,
            mix_timer_ms: 0.0,
        })
    }

    /// Run the frame loop until Escape is pressed. Terminal phases keep
    /// rendering their announcement instead of simulating.
    pub async fn run(&mut self, renderer: &mut Renderer) {
        info!("Starting main loop...");

        loop {
            if is_key_down(KeyCode::Escape) {
                break;
            }

            if self.phase == GamePhase::Playing {
                self.tick(get_frame_time() as f64 * 1000.0);
                if self.phase == GamePhase::Playing {
                    controls::handle_player_controls(&mut self.player);
                }
            }

            let announcement = match self.phase {
                GamePhase::Playing => None,
                GamePhase::GameOver => Some("Game Over"),
                GamePhase::LevelComplete => Some("Level Complete!"),
            };
            renderer.draw_frame(&self.level, &self.player, announcement);
            next_frame().await;
        }

        info!("Exiting.");
    }

    /// One simulation tick. The stereo mix is only recomputed once the
    /// accumulated frame time crosses the mix interval; collision and
    /// completion checks run every tick.
    fn tick(&mut self, frame_ms: f64) {
        self.mix_timer_ms += frame_ms;
        let adjust_audio = self.mix_timer_ms >= config::AUDIO_MIX_INTERVAL_MS;
        if adjust_audio {
            self.mix_timer_ms = 0.0;
        }

        let outcome = scan::scan_surroundings(&mut self.player, &mut self.level, adjust_audio);
        match outcome.verdict {
            ScanVerdict::Collision => {
                info!("Player hit an obstacle, game over");
                self.audio.play_game_over();
                self.phase = GamePhase::GameOver;
            }
            ScanVerdict::LevelComplete => {
                info!("Target reached, level complete");
                self.audio.play_completion();
                self.phase = GamePhase::LevelComplete;
            }
            ScanVerdict::Continue => {
                if let Some(mix) = outcome.mix {
                    self.audio.apply_mix(&mix);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Obstacle;
    use crate::types::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Audio stays unloaded in tests, so every tone call is a no-op.
    fn test_game(obstacles: Vec<Obstacle>, target: Point) -> Game {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::generate(4, 4, &mut rng).unwrap();
        let level = Level {
            maze,
            obstacles,
            start: Point::new(150.0, 100.0),
            target,
            cell_width: 300.0,
            cell_height: 200.0,
            view_radius: 300.0,
        };
        let player = Player::new(
            Point::new(600.0, 400.0),
            Angle::new(0.0),
            (1200.0, 800.0),
            PolarCoordinate::new(Angle::new(config::VIEW_CONE_HALF_ANGLE), 300.0),
        );

        Game {
            level,
            player,
            audio: AudioManager::new(),
            phase: GamePhase::Playing,
            mix_timer_ms: 0.0,
        }
    }

    #[test]
    fn test_collision_ends_game() {
        let mut game = test_game(
            vec![Obstacle::new(Point::new(610.0, 400.0))],
            Point::new(2000.0, 2000.0),
        );

        game.tick(0.0);

        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(!game.player.is_alive);
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let mut game = test_game(Vec::new(), Point::new(640.0, 400.0));

        game.tick(0.0);

        assert_eq!(game.phase, GamePhase::LevelComplete);
        assert!(game.player.is_alive);
    }

    #[test]
    fn test_mix_timer_throttles_audio_updates() {
        let mut game = test_game(Vec::new(), Point::new(2000.0, 2000.0));

        game.tick(30.0);
        assert_eq!(game.mix_timer_ms, 30.0);

        // Crossing the interval resets the accumulator.
        game.tick(40.0);
        assert_eq!(game.mix_timer_ms, 0.0);

        game.tick(59.9);
        assert_eq!(game.mix_timer_ms, 59.9);
    }
}
