pub mod palette;
pub mod slider;
pub mod toggle;
pub mod button;
pub mod panel;

pub use slider::DragSlider;
pub use toggle::ToggleControl;
pub use button::ActionButton;
pub use panel::{SceneSettings, SettingsPanel};
