// CONTROLLER: input, camera/player control and the per-frame update loop
pub mod input;
pub mod physics;
pub mod camera_controller;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputState, Key, KeyBindings, MouseButton};
pub use physics::Drive;
pub use camera_controller::{CameraController, CameraRequest};
pub use frame_loop::{FrameOrchestrator, Occupancy};
