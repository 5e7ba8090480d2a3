use egui::Color32;
use glam::Vec3;

use crate::utils::BoundingBox;
use crate::view::Canvas3D;

/// The walking character. Heading is in radians around +Y, 0 facing +X.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub heading: f32,
    pub half_extents: Vec3,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            heading: 0.0,
            half_extents: Vec3::new(0.4, 1.0, 0.4),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center(self.position, self.half_extents)
    }

    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
    }

    /// Hidden while seated in the car
    pub fn render(&self, canvas: &mut dyn Canvas3D, in_car: bool) {
        if in_car {
            return;
        }
        canvas.bounding_box(&self.bounding_box(), Color32::from_rgb(0, 121, 241));
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Car {
    pub position: Vec3,
    pub heading: f32,
    pub half_extents: Vec3,
}

impl Car {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(6.0, 0.75, 0.0),
            heading: 0.0,
            half_extents: Vec3::new(2.0, 0.75, 1.0),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center(self.position, self.half_extents)
    }

    /// While occupied the car follows the player; otherwise it stays parked
    pub fn update(&mut self, player_heading: f32, player_position: Vec3, in_car: bool) {
        if !in_car {
            return;
        }
        self.heading = player_heading;
        self.position = Vec3::new(player_position.x, self.half_extents.y, player_position.z);
    }

    pub fn render(&self, canvas: &mut dyn Canvas3D) {
        canvas.bounding_box(&self.bounding_box(), Color32::from_rgb(230, 41, 55));
    }
}

impl Default for Car {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::check_collision_boxes;

    #[test]
    fn parked_car_ignores_player() {
        let mut car = Car::new();
        let parked = car.position;
        car.update(1.0, Vec3::new(50.0, 1.0, 50.0), false);
        assert_eq!(car.position, parked);
        assert_eq!(car.heading, 0.0);
    }

    #[test]
    fn occupied_car_tracks_player() {
        let mut car = Car::new();
        car.update(0.5, Vec3::new(20.0, 1.0, -3.0), true);
        assert_eq!(car.position, Vec3::new(20.0, 0.75, -3.0));
        assert_eq!(car.heading, 0.5);
    }

    #[test]
    fn player_starts_clear_of_car() {
        let player = Player::new();
        let car = Car::new();
        assert!(!check_collision_boxes(&player.bounding_box(), &car.bounding_box()));
    }
}
