use glam::Vec2;

use crate::controller::InputState;
use crate::error::LayoutError;
use crate::ui::palette::{BLACK, GRAY, LIGHTGRAY};
use crate::utils::{check_collision_point_rec, Rect};
use crate::view::Canvas2D;

const LABEL_OFFSET: Vec2 = Vec2::new(35.0, 20.0);
const LABEL_SIZE: f32 = 12.0;
const OUTLINE: f32 = 1.2;

/// Labelled checkbox. Holds no flag of its own; the caller passes the flag in and gets the
/// (possibly flipped) flag back.
#[derive(Debug, Clone)]
pub struct ToggleControl {
    label: String,
    region: Rect,
}

impl ToggleControl {
    pub fn new(label: impl Into<String>, region: Rect) -> Result<Self, LayoutError> {
        Ok(Self { label: label.into(), region: region.validated()? })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// Flips `flag` only on a click edge over the region
    pub fn interact(&self, flag: bool, pointer: Vec2, clicked: bool) -> bool {
        if clicked && check_collision_point_rec(pointer, &self.region) {
            !flag
        } else {
            flag
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D, flag: bool, hovered: bool) {
        if hovered {
            canvas.fill_rect(self.region, LIGHTGRAY);
        }
        if flag {
            canvas.fill_rect(self.region, GRAY);
        }
        canvas.rect_lines(self.region, OUTLINE, BLACK);
        canvas.text(
            &self.label,
            self.region.x + LABEL_OFFSET.x,
            self.region.y + LABEL_OFFSET.y,
            LABEL_SIZE,
            BLACK,
        );
    }

    /// Draw with this frame's state, then apply the click
    pub fn show(&self, flag: bool, input: &InputState, canvas: &mut dyn Canvas2D) -> bool {
        let hovered = check_collision_point_rec(input.pointer, &self.region);
        self.draw(canvas, flag, hovered);
        self.interact(flag, input.pointer, input.is_pointer_pressed())
    }
}
