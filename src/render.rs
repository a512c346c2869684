use crate::config;
use crate::controls;
use crate::geometry::PolarCoordinate;
use crate::level::Level;
use crate::player::Player;
use crate::types::Point;
use macroquad::prelude::*;

const BACKGROUND_COLOR: Color = BLACK;
const PLAYER_COLOR: Color = BLUE;
const PLAYER_DEAD_COLOR: Color = DARKGRAY;
const FRUSTUM_COLOR: Color = WHITE;
const OBSTACLE_COLOR: Color = GREEN;
const OBSTACLE_IN_SIGHT_COLOR: Color = RED;
const TARGET_COLOR: Color = GOLD;
const HINT_FONT_SIZE: f32 = 20.0;
const ANNOUNCEMENT_FONT_SIZE: f32 = 48.0;

// Conversion helper
fn to_screen(point: Point) -> Vec2 {
    Vec2::new(point.x as f32, point.y as f32)
}

// Handles rendering the simulation state using macroquad
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw_frame(&self, level: &Level, player: &Player, announcement: Option<&str>) {
        clear_background(BACKGROUND_COLOR);
        self.draw_objects(level);
        self.draw_player(player);
        draw_text(controls::control_hint(), 20.0, 20.0, HINT_FONT_SIZE, WHITE);

        if let Some(text) = announcement {
            self.draw_announcement(text);
        }
    }

    fn draw_objects(&self, level: &Level) {
        for obstacle in &level.obstacles {
            let color = if obstacle.in_sight {
                OBSTACLE_IN_SIGHT_COLOR
            } else {
                OBSTACLE_COLOR
            };
            let position = to_screen(obstacle.position);
            draw_circle(
                position.x,
                position.y,
                config::OBSTACLE_RADIUS as f32,
                color,
            );
        }

        let target = to_screen(level.target);
        draw_circle(target.x, target.y, config::TARGET_RADIUS as f32, TARGET_COLOR);
    }

    fn draw_player(&self, player: &Player) {
        let body_color = if player.is_alive {
            PLAYER_COLOR
        } else {
            PLAYER_DEAD_COLOR
        };
        let position = to_screen(player.position);
        draw_circle(position.x, position.y, config::BODY_RADIUS as f32, body_color);

        let cone = player.view_cone;
        let arc_start = player.facing.sub(cone.angle);
        let arc_end = player.facing.add(cone.angle);

        // Screen angles run clockwise, so the frustum arc sweeps from
        // the negated upper edge.
        draw_arc(
            position.x,
            position.y,
            48,
            cone.radius as f32,
            -arc_end.to_degrees() as f32,
            1.0,
            cone.angle.mul(2.0).to_degrees() as f32,
            FRUSTUM_COLOR,
        );

        for edge in [arc_start, arc_end] {
            let tip = to_screen(
                player.to_world_position(PolarCoordinate::new(edge, cone.radius)),
            );
            draw_line(position.x, position.y, tip.x, tip.y, 1.0, FRUSTUM_COLOR);
        }
    }

    fn draw_announcement(&self, text: &str) {
        let size = measure_text(text, None, ANNOUNCEMENT_FONT_SIZE as u16, 1.0);
        draw_text(
            text,
            (screen_width() - size.width) / 2.0,
            screen_height() / 2.0,
            ANNOUNCEMENT_FONT_SIZE,
            WHITE,
        );
    }
}
