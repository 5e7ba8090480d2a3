use glam::Vec2;

use crate::controller::InputState;
use crate::error::LayoutError;
use crate::ui::palette::{BLACK, DARKGRAY, LIGHTGRAY};
use crate::utils::{check_collision_point_rec, Rect};
use crate::view::Canvas2D;

/// Horizontal slider that owns its value. Dragging is level-triggered: the value follows the
/// pointer every frame the button is held over the handle.
#[derive(Debug, Clone)]
pub struct DragSlider {
    track: Rect,
    handle_width: f32,
    min: f32,
    max: f32,
    value: f32,
}

impl DragSlider {
    pub fn new(track: Rect, handle_width: f32, min: f32, max: f32, value: f32) -> Result<Self, LayoutError> {
        let track = track.validated()?;
        if track.width <= handle_width || handle_width <= 0.0 {
            return Err(LayoutError::TrackNarrowerThanHandle {
                track_width: track.width,
                handle_width,
            });
        }
        if !(min < max) {
            return Err(LayoutError::EmptyRange { min, max });
        }
        let mut slider = Self { track, handle_width, min, max, value: min };
        slider.set_value(value);
        Ok(slider)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Position of the value inside the range, in [0, 1]
    pub fn normalized(&self) -> f32 {
        (self.value - self.min) / (self.max - self.min)
    }

    fn travel(&self) -> f32 {
        self.track.width - self.handle_width
    }

    pub fn handle_rect(&self) -> Rect {
        Rect::new(
            self.track.x + self.normalized() * self.travel(),
            self.track.y,
            self.handle_width,
            self.track.height,
        )
    }

    /// Apply one frame of pointer input. Returns whether the handle is being dragged.
    pub fn interact(&mut self, pointer: Vec2, pointer_down: bool) -> bool {
        let dragging = pointer_down && check_collision_point_rec(pointer, &self.handle_rect());
        if dragging {
            let t = (pointer.x - self.track.x - self.handle_width / 2.0) / self.travel();
            self.set_value(self.min + t * (self.max - self.min));
        }
        dragging
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D, dragging: bool) {
        canvas.fill_rect(self.track, LIGHTGRAY);
        canvas.fill_rect(self.handle_rect(), if dragging { BLACK } else { DARKGRAY });
    }

    /// Interact, draw, and return the value after this frame's input
    pub fn show(&mut self, input: &InputState, canvas: &mut dyn Canvas2D) -> f32 {
        let dragging = self.interact(input.pointer, input.pointer_down);
        self.draw(canvas, dragging);
        self.value
    }
}
