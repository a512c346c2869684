use crate::player::Player;
use macroquad::prelude::{KeyCode, is_key_down};

/// Apply the currently held movement keys to the player.
pub fn handle_player_controls(player: &mut Player) {
    if is_key_down(KeyCode::W) {
        player.move_forward();
    }

    if is_key_down(KeyCode::Left) {
        player.turn_left();
    }
    if is_key_down(KeyCode::Right) {
        player.turn_right();
    }
}

pub fn control_hint() -> &'static str {
    "Move Forward: W | Turn Right-Left: Arrows"
}
