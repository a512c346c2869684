//! The per-tick navigation scan.
//!
//! Walks every obstacle once, updating display states and watching for
//! the two terminal outcomes; on audio-mix ticks it also reduces the
//! visible obstacles to one closest distance per sector and derives the
//! target cue.

use crate::audio::{AudioMix, TargetCue, distance_to_volume};
use crate::config;
use crate::level::Level;
use crate::player::{Direction, Player};

/// What a tick's scan concluded. Both non-`Continue` verdicts are
/// terminal state transitions, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanVerdict {
    Continue,
    Collision,
    LevelComplete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOutcome {
    pub verdict: ScanVerdict,
    /// Present only on audio-mix ticks that did not end the game.
    pub mix: Option<AudioMix>,
}

/// Scan all obstacles and the target against the current player state.
///
/// `adjust_audio` marks the throttled audio-mix ticks; collision and
/// completion are checked on every tick regardless.
pub fn scan_surroundings(player: &mut Player, level: &mut Level, adjust_audio: bool) -> ScanOutcome {
    let cone_radius = player.view_cone.radius;
    // One past the cone radius means "nothing in this sector".
    let sentinel = cone_radius + 1.0;
    let mut closest_left = sentinel;
    let mut closest_center = sentinel;
    let mut closest_right = sentinel;

    for obstacle in level.obstacles.iter_mut() {
        let relative = player.to_relative_polar(obstacle.position);
        if player.can_see(relative) {
            obstacle.in_sight = true;

            // Touching a visible obstacle ends the game; the rest of
            // this tick's obstacles are left as they are.
            let distance = player.distance_to(obstacle.position);
            if distance <= config::BODY_RADIUS {
                player.is_alive = false;
                return ScanOutcome {
                    verdict: ScanVerdict::Collision,
                    mix: None,
                };
            }

            if adjust_audio {
                match player.direction_of(relative) {
                    Direction::Left => closest_left = closest_left.min(distance),
                    Direction::Center => closest_center = closest_center.min(distance),
                    Direction::Right => closest_right = closest_right.min(distance),
                }
            }
        } else {
            obstacle.in_sight = false;
        }
    }

    let target_distance = player.distance_to(level.target);
    if target_distance < config::TARGET_RADIUS + config::BODY_RADIUS {
        return ScanOutcome {
            verdict: ScanVerdict::LevelComplete,
            mix: None,
        };
    }

    let mix = adjust_audio.then(|| {
        crate::debug_scan!(
            "closest per sector: left {:.1} center {:.1} right {:.1}",
            closest_left,
            closest_center,
            closest_right
        );

        // The target only sounds while the player faces it; its volume
        // falls off over the screen width rather than the cone radius.
        let target_polar = player.to_relative_polar(level.target);
        let target = player.is_facing(target_polar).then(|| TargetCue {
            direction: player.direction_of(target_polar),
            volume: distance_to_volume(target_distance, player.screen_width()),
        });

        AudioMix {
            left: distance_to_volume(closest_left, cone_radius),
            center: distance_to_volume(closest_center, cone_radius),
            right: distance_to_volume(closest_right, cone_radius),
            target,
        }
    });

    ScanOutcome {
        verdict: ScanVerdict::Continue,
        mix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Angle, PolarCoordinate};
    use crate::level::{Maze, Obstacle};
    use crate::types::Point;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn test_level(obstacles: Vec<Obstacle>, target: Point) -> Level {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = Maze::generate(4, 4, &mut rng).unwrap();
        Level {
            maze,
            obstacles,
            start: Point::new(150.0, 100.0),
            target,
            cell_width: 300.0,
            cell_height: 200.0,
            view_radius: 300.0,
        }
    }

    fn test_player(position: Point, facing: f64) -> Player {
        Player::new(
            position,
            Angle::new(facing),
            (1200.0, 800.0),
            PolarCoordinate::new(Angle::new(config::VIEW_CONE_HALF_ANGLE), 300.0),
        )
    }

    #[test]
    fn test_marks_visible_obstacles_in_sight() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        let ahead = Obstacle::new(Point::new(700.0, 400.0));
        let behind = Obstacle::new(Point::new(500.0, 400.0));
        let mut level = test_level(vec![ahead, behind], Point::new(2000.0, 2000.0));

        let outcome = scan_surroundings(&mut player, &mut level, false);

        assert_eq!(outcome.verdict, ScanVerdict::Continue);
        assert!(level.obstacles[0].in_sight);
        assert!(!level.obstacles[1].in_sight);
    }

    #[test]
    fn test_collision_short_circuits() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        // Both obstacles are visible, the first within the body radius.
        let colliding = Obstacle::new(Point::new(610.0, 400.0));
        let further = Obstacle::new(Point::new(700.0, 400.0));
        let mut level = test_level(vec![colliding, further], Point::new(2000.0, 2000.0));

        let outcome = scan_surroundings(&mut player, &mut level, true);

        assert_eq!(outcome.verdict, ScanVerdict::Collision);
        assert!(outcome.mix.is_none());
        assert!(!player.is_alive);
        assert!(level.obstacles[0].in_sight);
        // The second obstacle was never processed this tick.
        assert!(!level.obstacles[1].in_sight);
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        // Within target radius + body radius.
        let mut level = test_level(Vec::new(), Point::new(640.0, 400.0));

        let outcome = scan_surroundings(&mut player, &mut level, false);

        assert_eq!(outcome.verdict, ScanVerdict::LevelComplete);
        assert!(player.is_alive);
    }

    #[test]
    fn test_mix_tracks_closest_obstacle_per_sector() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        let cone = config::VIEW_CONE_HALF_ANGLE;

        let center_near = Obstacle::new(Point::new(700.0, 400.0));
        let center_far = Obstacle::new(Point::new(850.0, 400.0));
        let left = Obstacle::new(
            player.to_world_position(PolarCoordinate::new(Angle::new(cone * 5.0 / 6.0), 150.0)),
        );
        let mut level = test_level(
            vec![center_far, center_near, left],
            Point::new(2000.0, 2000.0),
        );

        let outcome = scan_surroundings(&mut player, &mut level, true);
        let mix = outcome.mix.expect("audio-mix tick must produce a mix");

        // Center reflects the nearer of the two center obstacles.
        assert_approx_eq!(mix.center, distance_to_volume(100.0, 300.0), 1e-6);
        assert_approx_eq!(mix.left, distance_to_volume(150.0, 300.0), 1e-6);
        // Empty sector: the sentinel pushes the volume at or below zero.
        assert!(mix.right <= 0.0);
        assert!(mix.target.is_none());
    }

    #[test]
    fn test_regular_tick_produces_no_mix() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        let mut level = test_level(Vec::new(), Point::new(2000.0, 2000.0));

        let outcome = scan_surroundings(&mut player, &mut level, false);

        assert_eq!(outcome.verdict, ScanVerdict::Continue);
        assert!(outcome.mix.is_none());
    }

    #[test]
    fn test_target_cue_while_facing() {
        let mut player = test_player(Point::new(100.0, 400.0), 0.0);
        let mut level = test_level(Vec::new(), Point::new(500.0, 400.0));

        let outcome = scan_surroundings(&mut player, &mut level, true);
        let cue = outcome
            .mix
            .expect("audio-mix tick must produce a mix")
            .target
            .expect("facing the target must produce a cue");

        assert_eq!(cue.direction, Direction::Center);
        assert_approx_eq!(cue.volume, distance_to_volume(400.0, 1200.0), 1e-6);
    }

    #[test]
    fn test_target_muted_while_facing_away() {
        let mut player = test_player(Point::new(100.0, 400.0), PI);
        let mut level = test_level(Vec::new(), Point::new(500.0, 400.0));

        let outcome = scan_surroundings(&mut player, &mut level, true);
        let mix = outcome.mix.expect("audio-mix tick must produce a mix");

        assert!(mix.target.is_none());
    }

    // Walking the one open corridor out of the start cell must not
    // trigger a collision: an open passage has no obstacles across it.
    #[test]
    fn test_corridor_walk_from_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = Maze::generate(4, 4, &mut rng).unwrap();
        let mut level = Level::build(maze, 1200.0, 800.0, config::OBSTACLE_RADIUS).unwrap();

        let (start_x, start_y) = level.maze.start();
        let maze = &level.maze;

        // Pick any open passage out of the start cell; the spanning
        // tree guarantees at least one.
        let (facing, neighbor) = if start_y > 0 && !maze.cell(start_x, start_y).wall_up {
            (FRAC_PI_2, (start_x, start_y - 1))
        } else if start_y + 1 < maze.height() && !maze.cell(start_x, start_y + 1).wall_up {
            (3.0 * FRAC_PI_2, (start_x, start_y + 1))
        } else if start_x > 0 && !maze.cell(start_x, start_y).wall_left {
            (PI, (start_x - 1, start_y))
        } else {
            (0.0, (start_x + 1, start_y))
        };

        let goal = Point::new(
            level.cell_width * (neighbor.0 as f64 + 0.5),
            level.cell_height * (neighbor.1 as f64 + 0.5),
        );

        let mut player = Player::new(
            level.start,
            Angle::new(facing),
            (1200.0, 800.0),
            PolarCoordinate::new(Angle::new(config::VIEW_CONE_HALF_ANGLE), level.view_radius),
        );

        for _ in 0..120 {
            let outcome = scan_surroundings(&mut player, &mut level, false);
            assert_ne!(outcome.verdict, ScanVerdict::Collision);
            assert!(player.is_alive);
            if player.distance_to(goal) <= config::MOVEMENT_SPEED {
                break;
            }
            player.move_forward();
        }

        assert!(player.distance_to(goal) <= config::MOVEMENT_SPEED);
    }

    #[test]
    fn test_sentinel_sits_just_past_the_cone() {
        let mut player = test_player(Point::new(600.0, 400.0), 0.0);
        // An obstacle exactly at the cone radius is still audible.
        let at_edge = Obstacle::new(Point::new(900.0, 400.0));
        let mut level = test_level(vec![at_edge], Point::new(2000.0, 2000.0));

        let outcome = scan_surroundings(&mut player, &mut level, true);
        let mix = outcome.mix.expect("audio-mix tick must produce a mix");

        assert_approx_eq!(mix.center, 0.0, 1e-6);
        assert!(level.obstacles[0].in_sight);
    }
}
