//! Fixed UI colours (raylib's default palette)

use egui::Color32;

pub const LIGHTGRAY: Color32 = Color32::from_rgb(200, 200, 200);
pub const GRAY: Color32 = Color32::from_rgb(130, 130, 130);
pub const DARKGRAY: Color32 = Color32::from_rgb(80, 80, 80);
pub const RAYWHITE: Color32 = Color32::from_rgb(245, 245, 245);
pub const DARKBROWN: Color32 = Color32::from_rgb(76, 63, 47);
pub const BLACK: Color32 = Color32::BLACK;
pub const WHITE: Color32 = Color32::WHITE;
