use crate::controller::input::{InputProcessor, InputState};
use crate::model::Player;

/// Kinematic walking/driving for the player. No gravity or collision response.
pub struct Drive {
    pub walk_speed: f32,
    pub drive_speed: f32,
    pub turn_rate: f32,
}

impl Drive {
    pub fn new() -> Self {
        Self {
            walk_speed: 5.0,
            drive_speed: 18.0,
            turn_rate: 2.5,
        }
    }

    /// Forward/back moves along the heading, left/right turns
    pub fn update_player(&self, player: &mut Player, in_car: bool, input: &InputState, processor: &InputProcessor, dt: f32) {
        let axes = processor.movement_axes(input);
        let speed = if in_car { self.drive_speed } else { self.walk_speed };

        // Cars only steer while rolling
        let can_turn = !in_car || axes.x != 0.0;
        if can_turn {
            let reverse = if in_car && axes.x < 0.0 { -1.0 } else { 1.0 };
            player.heading += axes.y * self.turn_rate * dt * reverse;
        }

        if axes.x != 0.0 {
            player.position += player.facing() * axes.x * speed * dt;
        }
    }
}

impl Default for Drive {
    fn default() -> Self {
        Self::new()
    }
}
