//! Platform-agnostic input handling with per-frame edge detection
use std::collections::HashSet;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Enter,
    Escape,
}

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events; `repeat` marks OS auto-repeat
    KeyDown { key: Key, repeat: bool },
    KeyUp(Key),

    // Pointer events, logical pixels
    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, is_down: bool },

    // Window events
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input as seen by one frame: level state plus the edges that happened since the last frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub held_keys: HashSet<Key>,
    pressed_keys: HashSet<Key>,
    pub pointer: Vec2,
    pointer_delta: Vec2,
    pointer_seen: bool,
    pub pointer_down: bool,
    pointer_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, repeat } => {
                if !*repeat && self.held_keys.insert(*key) {
                    self.pressed_keys.insert(*key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.held_keys.remove(key);
            }
            InputEvent::PointerMoved { x, y } => {
                let pos = Vec2::new(*x, *y);
                if self.pointer_seen {
                    self.pointer_delta += pos - self.pointer;
                }
                self.pointer = pos;
                self.pointer_seen = true;
            }
            InputEvent::PointerButton { button: MouseButton::Left, is_down } => {
                if *is_down && !self.pointer_down {
                    self.pointer_pressed = true;
                }
                self.pointer_down = *is_down;
            }
            InputEvent::PointerButton { .. } => {}
            InputEvent::FocusLost => {
                self.clear();
            }
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// True only on the frame the key went down
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// True only on the frame the left button went down
    pub fn is_pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    /// Roll over to the next frame: edges and deltas are consumed, levels persist
    pub fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.pointer_pressed = false;
        self.pointer_delta = Vec2::ZERO;
    }

    pub fn clear(&mut self) {
        self.held_keys.clear();
        self.pressed_keys.clear();
        self.pointer_down = false;
        self.pointer_pressed = false;
        self.pointer_delta = Vec2::ZERO;
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    pub action: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            up: Key::Space,
            down: Key::Shift,
            action: Key::Enter,
        }
    }
}

/// High-level input queries over a binding set
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn is_moving_forward(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.forward) || input.is_key_down(Key::Up)
    }

    pub fn is_moving_backward(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.backward) || input.is_key_down(Key::Down)
    }

    pub fn is_moving_left(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.left) || input.is_key_down(Key::Left)
    }

    pub fn is_moving_right(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.right) || input.is_key_down(Key::Right)
    }

    pub fn is_rising(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.up)
    }

    pub fn is_sinking(&self, input: &InputState) -> bool {
        input.is_key_down(self.bindings.down)
    }

    /// (forward, right) in {-1, 0, 1}
    pub fn movement_axes(&self, input: &InputState) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(
            axis(self.is_moving_forward(input), self.is_moving_backward(input)),
            axis(self.is_moving_right(input), self.is_moving_left(input)),
        )
    }

    /// Edge of the enter/exit key
    pub fn action_pressed(&self, input: &InputState) -> bool {
        input.is_key_pressed(self.bindings.action)
    }
}

pub mod native {
    use super::*;
    use winit::keyboard::KeyCode;

    pub fn key_from_code(code: KeyCode) -> Option<Key> {
        Some(match code {
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::Space => Key::Space,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Escape => Key::Escape,
            _ => return None,
        })
    }

    pub fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}
