use egui::Color32;
use glam::Vec3;
use tracing::info;

use crate::config::AppConfig;
use crate::controller::camera_controller::{CameraController, CameraRequest};
use crate::controller::input::{InputProcessor, InputState, KeyBindings};
use crate::controller::physics::Drive;
use crate::error::LayoutError;
use crate::model::{Camera, Car, MapModel, OrbitBody, Player};
use crate::ui::palette::WHITE;
use crate::ui::{SceneSettings, SettingsPanel};
use crate::utils::check_collision_boxes;
use crate::view::{Canvas2D, Canvas3D};

const HUD_TEXT_SIZE: f32 = 12.0;

/// Whether the player is seated in the car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Outside,
    Inside,
}

impl Occupancy {
    pub fn toggled(self) -> Self {
        match self {
            Occupancy::Outside => Occupancy::Inside,
            Occupancy::Inside => Occupancy::Outside,
        }
    }

    pub fn in_car(self) -> bool {
        self == Occupancy::Inside
    }
}

/// Owns all scene state and runs one update + render per frame
pub struct FrameOrchestrator {
    pub camera: Camera,
    camera_controller: CameraController,
    processor: InputProcessor,
    drive: Drive,
    pub moon: OrbitBody,
    pub player: Player,
    pub car: Car,
    map: MapModel,
    panel: SettingsPanel,
    occupancy: Occupancy,
    /// Panel output of the previous frame; parameterizes this frame's update
    settings: SceneSettings,
    grid_slices: u32,
    grid_spacing: f32,
    screen_height: f32,
}

impl FrameOrchestrator {
    pub fn new(config: &AppConfig, map: MapModel) -> Result<Self, LayoutError> {
        let moon = OrbitBody::from_config(&config.moon)?;
        let panel = SettingsPanel::new(&config.moon)?;
        let settings = panel.settings();
        Ok(Self {
            camera: Camera::new(config.window.width, config.window.height, config.camera.fov_y_degrees),
            camera_controller: CameraController::new(&config.camera, moon.orbit_center()),
            processor: InputProcessor::new(KeyBindings::default()),
            drive: Drive::new(),
            moon,
            player: Player::new(),
            car: Car::new(),
            map,
            panel,
            occupancy: Occupancy::Outside,
            settings,
            grid_slices: config.scene.grid_slices,
            grid_spacing: config.scene.grid_spacing,
            screen_height: config.window.height as f32,
        })
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn settings(&self) -> SceneSettings {
        self.settings
    }

    /// Logical window size changed
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.screen_height = height as f32;
    }

    pub fn update(&mut self, input: &InputState, dt: f32) {
        let s = self.settings;

        self.camera_controller.update(
            &mut self.camera,
            input,
            &self.processor,
            CameraRequest {
                target: self.player.position,
                free_mode: s.free_camera,
                moon_view: s.view_moon,
                lock_pointer: s.visible,
            },
            dt,
        );

        self.moon.advance(s.moon_speed, s.moon_size, s.reverse_orbit, dt);

        let overlapping = check_collision_boxes(&self.player.bounding_box(), &self.car.bounding_box());
        if overlapping && self.processor.action_pressed(input) {
            self.occupancy = self.occupancy.toggled();
            match self.occupancy {
                Occupancy::Inside => info!("entering vehicle"),
                Occupancy::Outside => info!("exiting vehicle"),
            }
        }

        let in_car = self.occupancy.in_car();
        if !s.free_camera {
            self.drive.update_player(&mut self.player, in_car, input, &self.processor, dt);
        }

        self.car.update(self.player.heading, self.player.position, in_car);
    }

    /// Scene inside a scoped 3D pass, then HUD, then the panel last
    pub fn render(&mut self, input: &InputState, canvas3d: &mut dyn Canvas3D, canvas2d: &mut dyn Canvas2D) {
        {
            let mut scene = self.camera.begin_3d(canvas3d);
            scene.clear_background(Color32::BLACK);
            self.moon.render(&mut *scene);
            self.player.render(&mut *scene, self.occupancy.in_car());
            self.car.render(&mut *scene);
            scene.model(&self.map, Vec3::ZERO, 1.0, Color32::WHITE);
            scene.grid(self.grid_slices, self.grid_spacing);
        }

        let eye = self.camera.eye;
        let hud = format!("{} {} {}", eye.x.round() as i32, eye.y.round() as i32, eye.z.round() as i32);
        canvas2d.text(&hud, 10.0, self.screen_height - 50.0, HUD_TEXT_SIZE, WHITE);

        self.settings = self.panel.render(input, canvas2d);
    }

    pub fn frame(&mut self, input: &InputState, dt: f32, canvas3d: &mut dyn Canvas3D, canvas2d: &mut dyn Canvas2D) {
        self.update(input, dt);
        self.render(input, canvas3d, canvas2d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{InputEvent, Key, MouseButton};
    use crate::view::canvas::testing::{Draw3D, Recording3D, RecordingCanvas};
    use glam::Quat;
    use std::path::Path;

    fn orchestrator() -> FrameOrchestrator {
        let map = MapModel::from_obj_str("v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 3\n", Path::new("t.obj"), Quat::IDENTITY)
            .unwrap();
        FrameOrchestrator::new(&AppConfig::default(), map).unwrap()
    }

    fn enter_pressed() -> InputState {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown { key: Key::Enter, repeat: false });
        input
    }

    fn put_player_at_car(o: &mut FrameOrchestrator) {
        o.player.position = Vec3::new(o.car.position.x, 1.0, o.car.position.z);
    }

    #[test]
    fn invalid_orbit_period_fails_construction() {
        let mut config = AppConfig::default();
        config.moon.period = 0.0;
        let map = MapModel::from_obj_str("v 0 0 0\nv 1 0 0\nf 1 2\n", Path::new("t.obj"), Quat::IDENTITY).unwrap();
        assert!(matches!(
            FrameOrchestrator::new(&config, map),
            Err(LayoutError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn occupancy_guard_needs_overlap_and_key_edge() {
        // (overlap, key) -> toggles
        for (overlap, key, toggles) in [(false, false, false), (false, true, false), (true, false, false), (true, true, true)] {
            let mut o = orchestrator();
            if overlap {
                put_player_at_car(&mut o);
            }
            let input = if key { enter_pressed() } else { InputState::new() };
            o.update(&input, 0.0);
            let expected = if toggles { Occupancy::Inside } else { Occupancy::Outside };
            assert_eq!(o.occupancy(), expected, "overlap={overlap} key={key}");
        }
    }

    #[test]
    fn held_action_key_toggles_once() {
        let mut o = orchestrator();
        put_player_at_car(&mut o);
        let mut input = enter_pressed();
        for _ in 0..5 {
            o.update(&input, 0.0);
            input.end_frame();
        }
        assert_eq!(o.occupancy(), Occupancy::Inside);

        input.process_event(&InputEvent::KeyUp(Key::Enter));
        input.process_event(&InputEvent::KeyDown { key: Key::Enter, repeat: false });
        o.update(&input, 0.0);
        assert_eq!(o.occupancy(), Occupancy::Outside);
    }

    #[test]
    fn occupied_car_follows_player_in_same_frame() {
        let mut o = orchestrator();
        put_player_at_car(&mut o);
        let mut input = enter_pressed();
        input.process_event(&InputEvent::KeyDown { key: Key::W, repeat: false });
        o.update(&input, 0.5);
        assert!(o.occupancy().in_car());
        assert_eq!(o.car.position.x, o.player.position.x);
        assert_eq!(o.car.position.z, o.player.position.z);
    }

    #[test]
    fn free_camera_freezes_player() {
        let mut o = orchestrator();
        o.settings.free_camera = true;
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown { key: Key::W, repeat: false });
        let before = o.player.position;
        let eye_before = o.camera.eye;
        o.update(&input, 0.5);
        assert_eq!(o.player.position, before);
        assert_ne!(o.camera.eye, eye_before);
    }

    #[test]
    fn moon_advances_with_panel_settings() {
        let mut o = orchestrator();
        o.update(&InputState::new(), 5.0);
        let angle = 0.2f32 * 5.0;
        assert!((o.moon.position.y - 180.0 * angle.cos()).abs() < 1e-3);
        assert!((o.moon.position.z - (180.0 * angle.sin() + 160.0)).abs() < 1e-3);
        assert_eq!(o.moon.radius, 4.0);
    }

    #[test]
    fn render_order_is_scene_then_hud_then_panel() {
        let mut o = orchestrator();
        let mut c3 = Recording3D::default();
        let mut c2 = RecordingCanvas::default();
        o.render(&InputState::new(), &mut c3, &mut c2);

        assert_eq!(c3.calls.first(), Some(&Draw3D::Begin));
        assert_eq!(c3.calls[1], Draw3D::Clear);
        assert!(matches!(c3.calls[2], Draw3D::Sphere(..)));
        assert!(matches!(c3.calls[3], Draw3D::Box(_)));
        assert!(matches!(c3.calls[4], Draw3D::Box(_)));
        assert_eq!(c3.calls[5], Draw3D::Model);
        assert_eq!(c3.calls[6], Draw3D::Grid(24, 24.0));
        assert_eq!(c3.calls.last(), Some(&Draw3D::End));

        let texts = c2.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[1], "Settings");
    }

    #[test]
    fn player_hidden_while_in_car() {
        let mut o = orchestrator();
        put_player_at_car(&mut o);
        o.update(&enter_pressed(), 0.0);
        let mut c3 = Recording3D::default();
        o.render(&InputState::new(), &mut c3, &mut RecordingCanvas::default());
        assert_eq!(c3.calls.iter().filter(|c| matches!(c, Draw3D::Box(_))).count(), 1);
    }

    #[test]
    fn panel_output_applies_next_frame() {
        let mut o = orchestrator();
        let mut input = InputState::new();
        input.process_event(&InputEvent::PointerMoved { x: 20.0, y: 30.0 });
        input.process_event(&InputEvent::PointerButton { button: MouseButton::Left, is_down: true });

        o.frame(&input, 0.016, &mut Recording3D::default(), &mut RecordingCanvas::default());
        assert!(o.settings().visible);
    }

    #[test]
    fn hud_shows_rounded_eye() {
        let mut o = orchestrator();
        o.camera.eye = Vec3::new(1.4, -2.6, 10.5);
        let mut c2 = RecordingCanvas::default();
        o.render(&InputState::new(), &mut Recording3D::default(), &mut c2);
        assert_eq!(c2.texts()[0], "1 -3 11");
    }
}
