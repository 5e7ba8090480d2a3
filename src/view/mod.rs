// VIEW: draw backends and GPU plumbing
pub mod canvas;
pub mod lines;
pub mod render;
pub mod gpu_init;

pub use canvas::{Canvas2D, Canvas3D, EguiCanvas, Mode3D};
pub use lines::LineBatch;
pub use render::{OverlayFrame, SceneRenderer};
pub use gpu_init::GpuContext;
