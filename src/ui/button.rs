use glam::Vec2;

use crate::controller::InputState;
use crate::error::LayoutError;
use crate::ui::palette::{BLACK, DARKBROWN, DARKGRAY, GRAY, LIGHTGRAY};
use crate::utils::{check_collision_point_rec, Rect};
use crate::view::Canvas2D;

const TEXT_SIZE: f32 = 11.0;

/// Visual state of a button for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hovered,
    Disabled,
    DisabledHovered,
}

impl ButtonState {
    fn new(enabled: bool, hovered: bool) -> Self {
        match (enabled, hovered) {
            (true, false) => ButtonState::Normal,
            (true, true) => ButtonState::Hovered,
            (false, false) => ButtonState::Disabled,
            (false, true) => ButtonState::DisabledHovered,
        }
    }

    fn is_hovered(self) -> bool {
        matches!(self, ButtonState::Hovered | ButtonState::DisabledHovered)
    }
}

/// Text button with centred label; activates on a click edge
#[derive(Debug, Clone)]
pub struct ActionButton {
    label: String,
    region: Rect,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, region: Rect) -> Result<Self, LayoutError> {
        Ok(Self { label: label.into(), region: region.validated()? })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// Disabled buttons never activate
    pub fn interact(&self, pointer: Vec2, clicked: bool, enabled: bool) -> bool {
        enabled && clicked && check_collision_point_rec(pointer, &self.region)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D, state: ButtonState) {
        let background = if state.is_hovered() { DARKBROWN } else { LIGHTGRAY };
        let text_color = match state {
            ButtonState::Normal => DARKGRAY,
            ButtonState::Hovered => BLACK,
            ButtonState::Disabled | ButtonState::DisabledHovered => GRAY,
        };

        let text_x = self.region.x + (self.region.width - canvas.measure_text(&self.label, TEXT_SIZE)) / 2.0;
        let text_y = self.region.y + (self.region.height - TEXT_SIZE) / 2.0;

        canvas.fill_rect(self.region, background);
        canvas.text(&self.label, text_x, text_y, TEXT_SIZE, text_color);
    }

    pub fn show(&self, input: &InputState, canvas: &mut dyn Canvas2D, enabled: bool) -> bool {
        let hovered = check_collision_point_rec(input.pointer, &self.region);
        self.draw(canvas, ButtonState::new(enabled, hovered));
        self.interact(input.pointer, input.is_pointer_pressed(), enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{InputEvent, MouseButton};
    use crate::view::canvas::testing::{Draw2D, RecordingCanvas};

    fn hide_button() -> ActionButton {
        ActionButton::new("Hide", Rect::new(140.0, 280.0, 50.0, 30.0)).unwrap()
    }

    fn clicked_at(x: f32, y: f32) -> InputState {
        let mut input = InputState::new();
        input.process_event(&InputEvent::PointerMoved { x, y });
        input.process_event(&InputEvent::PointerButton { button: MouseButton::Left, is_down: true });
        input
    }

    #[test]
    fn click_edge_over_button_activates() {
        let b = hide_button();
        let mut canvas = RecordingCanvas::default();
        let mut input = clicked_at(150.0, 290.0);
        assert!(b.show(&input, &mut canvas, true));

        // still held next frame: no second activation
        input.end_frame();
        assert!(!b.show(&input, &mut canvas, true));
    }

    #[test]
    fn disabled_button_never_activates() {
        let b = hide_button();
        let r = b.region();
        let mut canvas = RecordingCanvas::default();
        for ix in -2..=12 {
            for iy in -2..=8 {
                let p = Vec2::new(r.x + ix as f32 * 5.0, r.y + iy as f32 * 5.0);
                for clicked in [false, true] {
                    assert!(!b.interact(p, clicked, false));
                }
                assert!(!b.show(&clicked_at(p.x, p.y), &mut canvas, false));
            }
        }
    }

    #[test]
    fn disabled_text_is_dimmed_regardless_of_hover() {
        let b = hide_button();
        let mut canvas = RecordingCanvas::default();
        b.show(&clicked_at(150.0, 290.0), &mut canvas, false);
        assert_eq!(canvas.text_color("Hide"), Some(GRAY));
        assert_eq!(canvas.fills()[0].1, DARKBROWN);
    }

    #[test]
    fn label_is_centred() {
        let b = hide_button();
        let mut canvas = RecordingCanvas::default();
        b.draw(&mut canvas, ButtonState::Normal);
        // recording canvas measures 6px per char: "Hide" = 24px
        assert_eq!(canvas.calls[1], Draw2D::Text("Hide".into(), 153.0, 289.5, DARKGRAY));
    }
}
