//! Immediate-mode draw backend seams.
//!
//! The frame loop and widgets only talk to these traits. Natively the 2D side is an
//! `egui::Painter` and the 3D side is a [`LineBatch`](crate::view::LineBatch); tests use the
//! recording doubles in [`testing`].

use egui::{Align2, Color32, FontId, Painter, Stroke, StrokeKind};
use glam::{Mat4, Vec3};

use crate::model::MapModel;
use crate::utils::{BoundingBox, Rect};

/// Screen-space primitives (logical pixels)
pub trait Canvas2D {
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color32);
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color32);
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

/// World-space primitives, only valid between `begin_3d` and `end_3d`
pub trait Canvas3D {
    fn begin_3d(&mut self, view_proj: Mat4);
    fn end_3d(&mut self);
    fn clear_background(&mut self, color: Color32);
    fn sphere(&mut self, center: Vec3, radius: f32, color: Color32);
    fn bounding_box(&mut self, bounds: &BoundingBox, color: Color32);
    fn model(&mut self, model: &MapModel, position: Vec3, scale: f32, tint: Color32);
    fn grid(&mut self, slices: u32, spacing: f32);
}

/// Scoped 3D drawing context. `end_3d` runs when the guard is dropped, so every exit path
/// out of a render block closes the scope exactly once.
pub struct Mode3D<'a> {
    canvas: &'a mut dyn Canvas3D,
}

impl<'a> Mode3D<'a> {
    pub fn begin(canvas: &'a mut dyn Canvas3D, view_proj: Mat4) -> Self {
        canvas.begin_3d(view_proj);
        Self { canvas }
    }
}

impl<'a> std::ops::Deref for Mode3D<'a> {
    type Target = dyn Canvas3D + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> std::ops::DerefMut for Mode3D<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for Mode3D<'_> {
    fn drop(&mut self) {
        self.canvas.end_3d();
    }
}

/// 2D canvas over an egui painter (one foreground layer for HUD and panel)
pub struct EguiCanvas {
    painter: Painter,
}

impl EguiCanvas {
    pub fn new(ctx: &egui::Context) -> Self {
        let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("hud")));
        Self { painter }
    }
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(rect.x, rect.y), egui::vec2(rect.width, rect.height))
}

impl Canvas2D for EguiCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(to_egui_rect(rect), 0.0, color);
    }

    fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color32) {
        self.painter.rect_stroke(to_egui_rect(rect), 0.0, Stroke::new(thickness, color), StrokeKind::Inside);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color32) {
        self.painter.text(egui::pos2(x, y), Align2::LEFT_TOP, text, FontId::proportional(size), color);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.painter
            .layout_no_wrap(text.to_string(), FontId::proportional(size), Color32::WHITE)
            .size()
            .x
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Draw2D {
        Fill(Rect, Color32),
        Lines(Rect, Color32),
        Text(String, f32, f32, Color32),
    }

    /// Records 2D calls; text width is a fixed 6px per character
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<Draw2D>,
    }

    impl RecordingCanvas {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Draw2D::Text(t, ..) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn text_color(&self, label: &str) -> Option<Color32> {
            self.calls.iter().find_map(|c| match c {
                Draw2D::Text(t, _, _, color) if t == label => Some(*color),
                _ => None,
            })
        }

        pub fn fills(&self) -> Vec<(Rect, Color32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Draw2D::Fill(r, color) => Some((*r, *color)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas2D for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, color: Color32) {
            self.calls.push(Draw2D::Fill(rect, color));
        }

        fn rect_lines(&mut self, rect: Rect, _thickness: f32, color: Color32) {
            self.calls.push(Draw2D::Lines(rect, color));
        }

        fn text(&mut self, text: &str, x: f32, y: f32, _size: f32, color: Color32) {
            self.calls.push(Draw2D::Text(text.to_string(), x, y, color));
        }

        fn measure_text(&self, text: &str, _size: f32) -> f32 {
            text.chars().count() as f32 * 6.0
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Draw3D {
        Begin,
        End,
        Clear,
        Sphere(Vec3, f32),
        Box(BoundingBox),
        Model,
        Grid(u32, f32),
    }

    #[derive(Default)]
    pub struct Recording3D {
        pub calls: Vec<Draw3D>,
    }

    impl Canvas3D for Recording3D {
        fn begin_3d(&mut self, _view_proj: Mat4) {
            self.calls.push(Draw3D::Begin);
        }

        fn end_3d(&mut self) {
            self.calls.push(Draw3D::End);
        }

        fn clear_background(&mut self, _color: Color32) {
            self.calls.push(Draw3D::Clear);
        }

        fn sphere(&mut self, center: Vec3, radius: f32, _color: Color32) {
            self.calls.push(Draw3D::Sphere(center, radius));
        }

        fn bounding_box(&mut self, bounds: &BoundingBox, _color: Color32) {
            self.calls.push(Draw3D::Box(*bounds));
        }

        fn model(&mut self, _model: &MapModel, _position: Vec3, _scale: f32, _tint: Color32) {
            self.calls.push(Draw3D::Model);
        }

        fn grid(&mut self, slices: u32, spacing: f32) {
            self.calls.push(Draw3D::Grid(slices, spacing));
        }
    }
}
