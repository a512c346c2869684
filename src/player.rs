//! The player model: kinematics, the viewing cone, and the left/center/
//! right sector classification that drives the stereo mix.

use crate::config;
use crate::geometry::{self, Angle, PolarCoordinate};
use crate::types::Point;

/// Where a perceived point sits inside the viewing cone.
///
/// This is a classification of a polar coordinate relative to the
/// current facing, not a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Center,
    Right,
}

impl Direction {
    /// Stereo panning for a tone coming from this sector:
    /// 0 = full left, 1 = full right.
    pub fn panning(self) -> f32 {
        match self {
            Direction::Left => 0.1,
            Direction::Center => 0.5,
            Direction::Right => 0.9,
        }
    }
}

/// The player's kinematic state. Created once per level and mutated
/// every tick by the movement keys; `is_alive` flips on collision and
/// never comes back.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Point,
    pub facing: Angle,
    screen_width: f64,
    screen_height: f64,
    /// Half-angle and radius of the viewing cone. The radius is a
    /// per-level value scaled to the maze cell size.
    pub view_cone: PolarCoordinate,
    pub is_alive: bool,
}

impl Player {
    pub fn new(
        position: Point,
        facing: Angle,
        screen_dimensions: (f64, f64),
        view_cone: PolarCoordinate,
    ) -> Self {
        Player {
            position,
            facing,
            screen_width: screen_dimensions.0,
            screen_height: screen_dimensions.1,
            view_cone,
            is_alive: true,
        }
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.add(Angle::new(config::TURNING_SPEED));
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.sub(Angle::new(config::TURNING_SPEED));
    }

    /// Step along the facing direction. A step that would leave the
    /// screen is silently dropped; this is the boundary clamp, not an
    /// error.
    pub fn move_forward(&mut self) {
        let increment =
            PolarCoordinate::new(self.facing, config::MOVEMENT_SPEED).to_cartesian();
        let next = self.position + increment;
        if self.is_in_screen_bounds(next) {
            self.position = next;
        }
    }

    fn is_in_screen_bounds(&self, position: Point) -> bool {
        0.0 < position.x
            && position.x < self.screen_width
            && 0.0 < position.y
            && position.y < self.screen_height
    }

    /// Whether the point's angle falls inside the viewing cone arc.
    pub fn is_facing(&self, point: PolarCoordinate) -> bool {
        let upper_bound = self.facing.add(self.view_cone.angle);
        let lower_bound = self.facing.sub(self.view_cone.angle);

        point.angle.is_in_bounds(lower_bound, upper_bound)
    }

    /// Within the cone arc and no further out than the cone radius.
    pub fn can_see(&self, point: PolarCoordinate) -> bool {
        point.radius <= self.view_cone.radius && self.is_facing(point)
    }

    /// Classify a point already known to be inside the viewing cone into
    /// one of three equal-angle sectors. Tested in order Left, Center,
    /// then Right as the fallthrough.
    pub fn direction_of(&self, point: PolarCoordinate) -> Direction {
        let section_arc = self.view_cone.angle.mul(2.0 / 3.0);

        let left_bound = self.facing.add(self.view_cone.angle);
        let right_bound = self.facing.sub(self.view_cone.angle);
        let left_center_bound = left_bound.sub(section_arc);
        let right_center_bound = right_bound.add(section_arc);

        if point.angle.is_in_bounds(left_center_bound, left_bound) {
            Direction::Left
        } else if point.angle.is_in_bounds(right_center_bound, left_center_bound) {
            Direction::Center
        } else {
            Direction::Right
        }
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        self.position.distance(&point)
    }

    /// World position to a polar coordinate relative to the player.
    pub fn to_relative_polar(&self, point: Point) -> PolarCoordinate {
        geometry::relative_polar(self.position, point)
    }

    /// Player-relative polar coordinate back to a world position.
    pub fn to_world_position(&self, polar: PolarCoordinate) -> Point {
        self.position + polar.to_cartesian()
    }
}
