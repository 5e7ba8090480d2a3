use glam::{Mat4, Vec3};

use crate::view::{Canvas3D, Mode3D};

pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, fov_y_degrees: f32) -> Self {
        Self {
            eye: Vec3::new(8.0, 4.0, 8.0),
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            z_near: 0.1,
            z_far: 2000.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let cy = self.yaw;
        let cp = self.pitch.clamp(-1.5533, 1.5533); // Slightly less than π/2 to avoid gimbal lock
        Vec3::new(cy.cos() * cp.cos(), cp.sin(), cy.sin() * cp.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    pub fn target(&self) -> Vec3 { self.eye + self.forward() }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target(), self.up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }

    pub fn set_look_at(&mut self, target: Vec3) {
        let delta = target - self.eye;
        if delta.length_squared() < 1e-8 {
            return;
        }
        let dir = delta.normalize();
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.asin().clamp(-1.4, 1.4);
    }

    /// Open the 3D draw scope with this camera's transform; closed when the guard drops
    pub fn begin_3d<'a>(&self, canvas: &'a mut dyn Canvas3D) -> Mode3D<'a> {
        Mode3D::begin(canvas, self.view_proj())
    }
}
