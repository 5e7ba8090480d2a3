use glam::{Quat, Vec3};

use crate::config::CameraConfig;
use crate::controller::input::{InputProcessor, InputState};
use crate::model::Camera;

/// Per-frame camera request from the frame loop
#[derive(Debug, Clone, Copy)]
pub struct CameraRequest {
    pub target: Vec3,
    pub free_mode: bool,
    pub moon_view: bool,
    /// Pointer belongs to the UI; no mouse look
    pub lock_pointer: bool,
}

/// Handles camera placement for the three camera modes
pub struct CameraController {
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    follow_dir: Vec3,
    follow_distance: f32,
    follow_height: f32,
    follow_yaw: f32,
    moon_focus: Vec3,
}

impl CameraController {
    pub fn new(cfg: &CameraConfig, moon_focus: Vec3) -> Self {
        let dir = Vec3::from_array(cfg.follow_offset);
        Self {
            move_speed: cfg.move_speed,
            mouse_sensitivity: cfg.mouse_sensitivity,
            follow_dir: dir.try_normalize().unwrap_or(Vec3::X),
            follow_distance: cfg.follow_distance,
            follow_height: cfg.follow_height,
            follow_yaw: 0.0,
            moon_focus,
        }
    }

    pub fn update(
        &mut self,
        camera: &mut Camera,
        input: &InputState,
        processor: &InputProcessor,
        request: CameraRequest,
        dt: f32,
    ) {
        let look = if request.lock_pointer { glam::Vec2::ZERO } else { input.pointer_delta() };

        if request.free_mode {
            self.apply_look(camera, look.x, look.y);
            self.update_movement(camera, input, processor, dt);
        } else if request.moon_view {
            camera.eye = request.target + Vec3::new(0.0, self.follow_height, 0.0);
            camera.set_look_at(self.moon_focus);
        } else {
            self.follow_yaw += look.x * self.mouse_sensitivity;
            let offset = Quat::from_rotation_y(-self.follow_yaw) * self.follow_dir * self.follow_distance;
            camera.eye = request.target + offset + Vec3::new(0.0, self.follow_height, 0.0);
            camera.set_look_at(request.target + Vec3::Y);
        }
    }

    /// Apply mouse look delta to camera
    pub fn apply_look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.yaw += dx * self.mouse_sensitivity;
        let pi_half = std::f32::consts::PI / 2.0;
        camera.pitch = (camera.pitch - dy * self.mouse_sensitivity).clamp(-pi_half, pi_half);
    }

    /// Fly the camera with the movement keys
    pub fn update_movement(&self, camera: &mut Camera, input: &InputState, processor: &InputProcessor, dt: f32) {
        let axes = processor.movement_axes(input);
        let mut cam_move = camera.forward() * axes.x + camera.right() * axes.y;

        if processor.is_rising(input) {
            cam_move += Vec3::Y;
        }
        if processor.is_sinking(input) {
            cam_move -= Vec3::Y;
        }

        if cam_move.length_squared() > 0.0 {
            camera.eye += cam_move.normalize() * self.move_speed * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{InputEvent, Key};

    fn setup() -> (CameraController, Camera, InputProcessor) {
        let cfg = CameraConfig::default();
        (
            CameraController::new(&cfg, Vec3::new(-150.0, 0.0, 160.0)),
            Camera::new(640, 480, cfg.fov_y_degrees),
            InputProcessor::default(),
        )
    }

    fn request(free_mode: bool, moon_view: bool, lock_pointer: bool) -> CameraRequest {
        CameraRequest { target: Vec3::new(2.0, 1.0, 3.0), free_mode, moon_view, lock_pointer }
    }

    #[test]
    fn follow_mode_looks_at_target() {
        let (mut ctl, mut cam, proc) = setup();
        ctl.update(&mut cam, &InputState::new(), &proc, request(false, false, false), 0.016);
        let to_target = (Vec3::new(2.0, 2.0, 3.0) - cam.eye).normalize();
        assert!((cam.forward() - to_target).length() < 1e-3);
    }

    #[test]
    fn moon_view_faces_orbit_centre() {
        let (mut ctl, mut cam, proc) = setup();
        ctl.update(&mut cam, &InputState::new(), &proc, request(false, true, false), 0.016);
        let to_moon = (Vec3::new(-150.0, 0.0, 160.0) - cam.eye).normalize();
        assert!((cam.forward() - to_moon).length() < 1e-3);
    }

    #[test]
    fn free_mode_flies_with_keys() {
        let (mut ctl, mut cam, proc) = setup();
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown { key: Key::W, repeat: false });
        let before = cam.eye;
        ctl.update(&mut cam, &input, &proc, request(true, false, false), 0.5);
        let moved = cam.eye - before;
        assert!((moved.length() - ctl.move_speed * 0.5).abs() < 1e-3);
        assert!(moved.normalize().dot(cam.forward()) > 0.99);
    }

    #[test]
    fn locked_pointer_blocks_mouse_look() {
        let (mut ctl, mut cam, proc) = setup();
        let mut input = InputState::new();
        input.process_event(&InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        input.process_event(&InputEvent::PointerMoved { x: 200.0, y: 50.0 });

        ctl.update(&mut cam, &input, &proc, request(true, false, true), 0.016);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);

        ctl.update(&mut cam, &input, &proc, request(true, false, false), 0.016);
        assert!(cam.yaw > 0.0);
    }
}
