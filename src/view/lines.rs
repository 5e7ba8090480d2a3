use egui::{Color32, Rgba};
use glam::{Mat4, Vec3};

use crate::model::MapModel;
use crate::utils::{create_box_mesh, create_grid_mesh, create_sphere_mesh, BoundingBox, Mesh};
use crate::view::canvas::Canvas3D;

fn to_linear(color: Color32) -> [f32; 4] {
    Rgba::from(color).to_array()
}

/// CPU-side 3D frame: everything drawn inside the 3D scope, as one line list
pub struct LineBatch {
    pub mesh: Mesh,
    pub view_proj: Mat4,
    pub clear_color: Color32,
    in_scope: bool,
    sphere: Mesh,
    cube: Mesh,
    grid_cache: Option<((u32, u32), Mesh)>,
}

impl LineBatch {
    pub fn new() -> Self {
        Self {
            mesh: Mesh::empty(),
            view_proj: Mat4::IDENTITY,
            clear_color: Color32::BLACK,
            in_scope: false,
            sphere: create_sphere_mesh(8, 16),
            cube: create_box_mesh(),
            grid_cache: None,
        }
    }

    /// Drop last frame's geometry; cached primitive meshes survive
    pub fn reset(&mut self) {
        self.mesh.clear();
        self.in_scope = false;
    }

    pub fn is_in_scope(&self) -> bool {
        self.in_scope
    }

    fn push(&mut self, mesh_kind: Primitive, transform: Mat4, color: Color32) {
        if !self.in_scope {
            tracing::warn!("3D draw outside begin_3d/end_3d ignored");
            return;
        }
        let tint = to_linear(color);
        let src = match mesh_kind {
            Primitive::Sphere => &self.sphere,
            Primitive::Cube => &self.cube,
        };
        self.mesh.append_transformed(src, transform, tint);
    }
}

impl Default for LineBatch {
    fn default() -> Self {
        Self::new()
    }
}

enum Primitive {
    Sphere,
    Cube,
}

impl Canvas3D for LineBatch {
    fn begin_3d(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
        self.in_scope = true;
    }

    fn end_3d(&mut self) {
        self.in_scope = false;
    }

    fn clear_background(&mut self, color: Color32) {
        self.clear_color = color;
    }

    fn sphere(&mut self, center: Vec3, radius: f32, color: Color32) {
        let transform = Mat4::from_scale_rotation_translation(Vec3::splat(radius), glam::Quat::IDENTITY, center);
        self.push(Primitive::Sphere, transform, color);
    }

    fn bounding_box(&mut self, bounds: &BoundingBox, color: Color32) {
        let transform = Mat4::from_scale_rotation_translation(bounds.size(), glam::Quat::IDENTITY, bounds.center());
        self.push(Primitive::Cube, transform, color);
    }

    fn model(&mut self, model: &MapModel, position: Vec3, scale: f32, tint: Color32) {
        if !self.in_scope {
            tracing::warn!("model draw outside begin_3d/end_3d ignored");
            return;
        }
        let transform = Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(scale)) * model.transform;
        self.mesh.append_transformed(&model.mesh, transform, to_linear(tint));
    }

    fn grid(&mut self, slices: u32, spacing: f32) {
        if !self.in_scope {
            return;
        }
        let key = (slices, spacing.to_bits());
        if self.grid_cache.as_ref().map(|(k, _)| *k) != Some(key) {
            self.grid_cache = Some((key, create_grid_mesh(slices, spacing)));
        }
        if let Some((_, grid)) = &self.grid_cache {
            self.mesh.append_transformed(grid, Mat4::IDENTITY, [1.0; 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::canvas::Mode3D;

    #[test]
    fn draws_outside_scope_are_dropped() {
        let mut batch = LineBatch::new();
        batch.sphere(Vec3::ZERO, 1.0, Color32::WHITE);
        assert!(batch.mesh.is_empty());

        {
            let mut mode = Mode3D::begin(&mut batch, Mat4::IDENTITY);
            mode.sphere(Vec3::ZERO, 1.0, Color32::WHITE);
        }
        assert!(!batch.mesh.is_empty());
        assert!(!batch.is_in_scope());
    }

    #[test]
    fn sphere_is_scaled_and_translated() {
        let mut batch = LineBatch::new();
        batch.begin_3d(Mat4::IDENTITY);
        batch.sphere(Vec3::new(10.0, 0.0, 0.0), 4.0, Color32::WHITE);
        batch.end_3d();

        for v in &batch.mesh.vertices {
            let d = Vec3::from_array(v.pos) - Vec3::new(10.0, 0.0, 0.0);
            assert!((d.length() - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn reset_keeps_clear_color_but_drops_lines() {
        let mut batch = LineBatch::new();
        batch.begin_3d(Mat4::IDENTITY);
        batch.clear_background(Color32::BLACK);
        batch.grid(4, 1.0);
        batch.end_3d();
        assert_eq!(batch.mesh.segment_count(), 10);

        batch.reset();
        assert!(batch.mesh.is_empty());
        assert_eq!(batch.clear_color, Color32::BLACK);
    }
}
