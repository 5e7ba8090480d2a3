//! Settings overlay: a Settings button while hidden, the full panel while shown.

use crate::config::MoonConfig;
use crate::controller::InputState;
use crate::error::LayoutError;
use crate::ui::palette::{BLACK, RAYWHITE};
use crate::ui::{ActionButton, DragSlider, ToggleControl};
use crate::utils::Rect;
use crate::view::Canvas2D;

const SLIDER_LABEL_SIZE: f32 = 14.0;
const HANDLE_WIDTH: f32 = 10.0;

/// Scene parameters driven by the panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub moon_speed: f32,
    pub moon_size: f32,
    pub free_camera: bool,
    pub view_moon: bool,
    pub reverse_orbit: bool,
    pub visible: bool,
}

pub struct SettingsPanel {
    background: Rect,
    show_button: ActionButton,
    hide_button: ActionButton,
    free_camera_toggle: ToggleControl,
    view_moon_toggle: ToggleControl,
    reverse_toggle: ToggleControl,
    speed_slider: DragSlider,
    size_slider: DragSlider,
    free_camera: bool,
    view_moon: bool,
    reverse_orbit: bool,
    visible: bool,
}

impl SettingsPanel {
    pub fn new(moon: &MoonConfig) -> Result<Self, LayoutError> {
        let [speed_min, speed_max] = moon.speed_range;
        let [size_min, size_max] = moon.size_range;
        Ok(Self {
            background: Rect::new(10.0, 20.0, 180.0, 250.0).validated()?,
            show_button: ActionButton::new("Settings", Rect::new(10.0, 20.0, 100.0, 32.0))?,
            hide_button: ActionButton::new("Hide", Rect::new(140.0, 280.0, 50.0, 30.0))?,
            free_camera_toggle: ToggleControl::new("Camera Free Mode", Rect::new(20.0, 35.0, 28.0, 28.0))?,
            view_moon_toggle: ToggleControl::new("View Moon Mode", Rect::new(20.0, 70.0, 28.0, 28.0))?,
            reverse_toggle: ToggleControl::new("Reverse Moon", Rect::new(20.0, 105.0, 28.0, 28.0))?,
            speed_slider: DragSlider::new(
                Rect::new(20.0, 180.0, 100.0, 10.0),
                HANDLE_WIDTH,
                speed_min,
                speed_max,
                moon.speed,
            )?,
            size_slider: DragSlider::new(
                Rect::new(20.0, 230.0, 100.0, 10.0),
                HANDLE_WIDTH,
                size_min,
                size_max,
                moon.size,
            )?,
            free_camera: false,
            view_moon: false,
            reverse_orbit: false,
            visible: false,
        })
    }

    pub fn settings(&self) -> SceneSettings {
        SceneSettings {
            moon_speed: self.speed_slider.value(),
            moon_size: self.size_slider.value(),
            free_camera: self.free_camera,
            view_moon: self.view_moon,
            reverse_orbit: self.reverse_orbit,
            visible: self.visible,
        }
    }

    /// Draw the panel, apply this frame's input and return the updated settings.
    /// Visibility is read once up front: a frame either shows the Settings button or the
    /// panel, never both.
    pub fn render(&mut self, input: &InputState, canvas: &mut dyn Canvas2D) -> SceneSettings {
        if !self.visible {
            if self.show_button.show(input, canvas, true) {
                self.visible = true;
                tracing::debug!("settings panel shown");
            }
            return self.settings();
        }

        canvas.fill_rect(self.background, RAYWHITE);

        canvas.text("Moon Speed:", 20.0, 160.0, SLIDER_LABEL_SIZE, BLACK);
        self.speed_slider.show(input, canvas);

        canvas.text("Moon Size:", 20.0, 210.0, SLIDER_LABEL_SIZE, BLACK);
        self.size_slider.show(input, canvas);

        self.free_camera = self.free_camera_toggle.show(self.free_camera, input, canvas);
        self.view_moon = self.view_moon_toggle.show(self.view_moon, input, canvas);
        self.reverse_orbit = self.reverse_toggle.show(self.reverse_orbit, input, canvas);

        if self.hide_button.show(input, canvas, true) {
            self.visible = false;
            tracing::debug!("settings panel hidden");
        }

        self.settings()
    }
}
