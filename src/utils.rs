use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;
use bytemuck::NoUninit;

use crate::error::LayoutError;

/// Screen-space rectangle in logical pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rejects zero-area and negative-size rectangles
    pub fn validated(self) -> Result<Self, LayoutError> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(self)
        } else {
            Err(LayoutError::DegenerateRect { width: self.width, height: self.height })
        }
    }

    pub fn right(&self) -> f32 { self.x + self.width }

    pub fn bottom(&self) -> f32 { self.y + self.height }
}

/// Half-open point-in-rect test: left/top edges are inside, right/bottom are not
pub fn check_collision_point_rec(point: Vec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x < rect.right() && point.y >= rect.y && point.y < rect.bottom()
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }

    pub fn size(&self) -> Vec3 { self.max - self.min }
}

/// Closed overlap test; touching faces count as overlapping
pub fn check_collision_boxes(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.max.x >= b.min.x && a.min.x <= b.max.x
        && a.max.y >= b.min.y && a.min.y <= b.max.y
        && a.max.z >= b.min.z && a.min.z <= b.max.z
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Line-list mesh: every pair of indices is one segment
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.push(Vertex { pos: a.to_array(), color });
        self.vertices.push(Vertex { pos: b.to_array(), color });
        self.indices.extend_from_slice(&[base, base + 1]);
    }

    /// Append another mesh with its vertices transformed and colors multiplied by `tint`
    pub fn append_transformed(&mut self, other: &Mesh, transform: Mat4, tint: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for v in &other.vertices {
            let p = transform.transform_point3(Vec3::from_array(v.pos));
            self.vertices.push(Vertex {
                pos: p.to_array(),
                color: [
                    v.color[0] * tint[0],
                    v.color[1] * tint[1],
                    v.color[2] * tint[2],
                    v.color[3] * tint[3],
                ],
            });
        }
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {

        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Unit cube edges centred at the origin (side length 1)
pub fn create_box_mesh() -> Mesh {
    let h = 0.5;
    let verts = [
        [-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h],
        [-h, h, -h], [h, h, -h], [h, h, h], [-h, h, h],
    ]
    .iter()
    .map(|p| Vertex { pos: *p, color: WHITE })
    .collect();

    let indices = vec![
        0, 1, 1, 2, 2, 3, 3, 0, // bottom
        4, 5, 5, 6, 6, 7, 7, 4, // top
        0, 4, 1, 5, 2, 6, 3, 7, // sides
    ];

    Mesh { vertices: verts, indices }
}

/// Unit sphere as latitude rings plus longitude meridians
pub fn create_sphere_mesh(rings: u32, slices: u32) -> Mesh {
    let mut mesh = Mesh::empty();
    let tau = std::f32::consts::TAU;
    let pi = std::f32::consts::PI;

    let point = |lat: f32, lon: f32| Vec3::new(lat.sin() * lon.cos(), lat.cos(), lat.sin() * lon.sin());

    for r in 1..rings {
        let lat = pi * r as f32 / rings as f32;
        for s in 0..slices {
            let a = tau * s as f32 / slices as f32;
            let b = tau * (s + 1) as f32 / slices as f32;
            mesh.push_line(point(lat, a), point(lat, b), WHITE);
        }
    }
    for s in 0..slices {
        let lon = tau * s as f32 / slices as f32;
        for r in 0..rings {
            let a = pi * r as f32 / rings as f32;
            let b = pi * (r + 1) as f32 / rings as f32;
            mesh.push_line(point(a, lon), point(b, lon), WHITE);
        }
    }
    mesh
}

/// Ground grid on the XZ plane centred at the origin, `slices` cells per side
pub fn create_grid_mesh(slices: u32, spacing: f32) -> Mesh {
    let mut mesh = Mesh::empty();
    let half = slices as f32 / 2.0;
    let extent = half * spacing;
    let axis_color = [0.5, 0.5, 0.5, 1.0];
    let line_color = [0.75, 0.75, 0.75, 1.0];

    for i in 0..=slices {
        let offset = (i as f32 - half) * spacing;
        let color = if i as f32 == half { axis_color } else { line_color };
        mesh.push_line(Vec3::new(offset, 0.0, -extent), Vec3::new(offset, 0.0, extent), color);
        mesh.push_line(Vec3::new(-extent, 0.0, offset), Vec3::new(extent, 0.0, offset), color);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_in_rect_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 32.0);
        assert!(check_collision_point_rec(Vec2::new(10.0, 20.0), &r));
        assert!(check_collision_point_rec(Vec2::new(109.9, 51.9), &r));
        assert!(!check_collision_point_rec(Vec2::new(110.0, 30.0), &r));
        assert!(!check_collision_point_rec(Vec2::new(50.0, 52.0), &r));
        assert!(!check_collision_point_rec(Vec2::new(9.9, 30.0), &r));
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).validated().is_err());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).validated().is_err());
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).validated().is_ok());
    }

    #[test]
    fn boxes_overlap_and_separate() {
        let a = BoundingBox::from_center(Vec3::ZERO, Vec3::splat(1.0));
        let b = BoundingBox::from_center(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = BoundingBox::from_center(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(1.0));
        assert!(check_collision_boxes(&a, &b));
        assert!(check_collision_boxes(&b, &a));
        assert!(!check_collision_boxes(&a, &c));
    }

    #[test]
    fn append_transformed_offsets_indices() {
        let cube = create_box_mesh();
        let mut batch = Mesh::empty();
        batch.append_transformed(&cube, Mat4::IDENTITY, WHITE);
        batch.append_transformed(&cube, Mat4::from_translation(Vec3::X * 3.0), [0.5, 0.5, 0.5, 1.0]);

        assert_eq!(batch.vertices.len(), 16);
        assert_eq!(batch.segment_count(), 24);
        assert_eq!(batch.indices[24], 8);
        assert!((batch.vertices[8].pos[0] - 2.5).abs() < 1e-6);
        assert!((batch.vertices[8].color[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn grid_spans_slices_times_spacing() {
        let grid = create_grid_mesh(24, 1.0);
        assert_eq!(grid.segment_count(), 50);
        let max_x = grid.vertices.iter().map(|v| v.pos[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 12.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_points_lie_on_unit_sphere() {
        let sphere = create_sphere_mesh(8, 16);
        for v in &sphere.vertices {
            let len = Vec3::from_array(v.pos).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
