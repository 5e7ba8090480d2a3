use egui::Color32;
use glam::Vec3;

use crate::config::MoonConfig;
use crate::error::LayoutError;
use crate::view::Canvas3D;

/// A body circling on a fixed-x plane, driven by a wrapped phase accumulator
#[derive(Debug, Clone)]
pub struct OrbitBody {
    pub position: Vec3,
    /// Visual (render) radius
    pub radius: f32,
    orbit_radius: f32,
    period: f32,
    z_offset: f32,
    phase: f32,
}

impl OrbitBody {
    /// `period` must be finite and positive for the phase to stay in `[0, period)`
    pub fn new(start_x: f32, orbit_radius: f32, period: f32, z_offset: f32, radius: f32) -> Result<Self, LayoutError> {
        if !(period.is_finite() && period > 0.0) {
            return Err(LayoutError::InvalidPeriod { period });
        }
        Ok(Self {
            position: Vec3::new(start_x, 0.0, 0.0),
            radius,
            orbit_radius,
            period,
            z_offset,
            phase: 0.0,
        })
    }

    pub fn from_config(cfg: &MoonConfig) -> Result<Self, LayoutError> {
        Self::new(cfg.start_x, cfg.orbit_radius, cfg.period, cfg.z_offset, cfg.size)
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn z_offset(&self) -> f32 {
        self.z_offset
    }

    /// Centre of the circle the body moves on
    pub fn orbit_center(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.z_offset)
    }

    /// Step the phase by `dt` (backwards when `reverse`), wrap it into `[0, period)`
    /// and place the body on the circle for `angular_speed`
    pub fn advance(&mut self, angular_speed: f32, visual_size: f32, reverse: bool, dt: f32) {
        let step = if reverse { -dt } else { dt };
        self.phase = wrap_phase(self.phase + step, self.period);

        let angle = angular_speed * self.phase;
        let y = self.orbit_radius * angle.cos();
        let z = self.orbit_radius * angle.sin() + self.z_offset;

        self.radius = visual_size;
        self.position = Vec3::new(self.position.x, y, z);
    }

    pub fn render(&self, canvas: &mut dyn Canvas3D) {
        canvas.sphere(self.position, self.radius, Color32::WHITE);
    }
}

fn wrap_phase(phase: f32, period: f32) -> f32 {
    let wrapped = phase.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::canvas::testing::{Draw3D, Recording3D};

    fn moon() -> OrbitBody {
        OrbitBody::from_config(&MoonConfig::default()).unwrap()
    }

    #[test]
    fn phase_advances_forward_and_wraps() {
        let mut m = moon();
        m.advance(0.2, 4.0, false, 999.5);
        m.advance(0.2, 4.0, false, 1.0);
        assert!((m.phase() - 0.5).abs() < 1e-3, "phase = {}", m.phase());
    }

    #[test]
    fn reverse_from_zero_wraps_to_end_of_period() {
        let mut m = moon();
        m.advance(0.2, 4.0, true, 0.25);
        assert!((m.phase() - 999.75).abs() < 1e-3, "phase = {}", m.phase());
        assert!(m.phase() < m.period());
    }

    #[test]
    fn phase_stays_in_range_for_many_steps() {
        let mut m = moon();
        for i in 0..5000 {
            m.advance(1.3, 4.0, i % 7 == 0, 0.37);
            assert!(m.phase() >= 0.0 && m.phase() < m.period());
        }
    }

    #[test]
    fn tiny_negative_step_never_reaches_period() {
        let mut m = moon();
        m.advance(0.2, 4.0, true, 1e-12);
        assert!(m.phase() < m.period());
    }

    #[test]
    fn five_seconds_matches_closed_form() {
        let mut m = moon();
        m.advance(0.2, 4.0, false, 5.0);
        let expected_y = 180.0 * (0.2f32 * 5.0).cos();
        let expected_z = 180.0 * (0.2f32 * 5.0).sin() + 160.0;
        assert!((m.position.y - expected_y).abs() < 1e-3);
        assert!((m.position.z - expected_z).abs() < 1e-3);
        assert_eq!(m.position.x, -150.0);
    }

    #[test]
    fn five_seconds_of_frames_matches_closed_form() {
        let mut m = moon();
        for _ in 0..300 {
            m.advance(0.2, 4.0, false, 1.0 / 60.0);
        }
        let expected_y = 180.0 * (1.0f32).cos();
        let expected_z = 180.0 * (1.0f32).sin() + 160.0;
        assert!((m.position.y - expected_y).abs() < 0.05, "y = {}", m.position.y);
        assert!((m.position.z - expected_z).abs() < 0.05, "z = {}", m.position.z);
    }

    #[test]
    fn visual_size_is_taken_from_caller() {
        let mut m = moon();
        m.advance(0.2, 12.5, false, 0.1);
        assert_eq!(m.radius, 12.5);

        let mut rec = Recording3D::default();
        m.render(&mut rec);
        assert_eq!(rec.calls, vec![Draw3D::Sphere(m.position, 12.5)]);
    }

    #[test]
    fn non_positive_or_non_finite_period_is_rejected() {
        for period in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let err = OrbitBody::new(-150.0, 180.0, period, 160.0, 4.0).err();
            assert!(matches!(err, Some(LayoutError::InvalidPeriod { .. })), "period = {period}");
        }
    }

    #[test]
    fn zero_period_from_config_file_is_rejected() {
        let cfg = crate::config::AppConfig::from_toml("[moon]\nperiod = 0.0").unwrap();
        assert_eq!(
            OrbitBody::from_config(&cfg.moon).err(),
            Some(LayoutError::InvalidPeriod { period: 0.0 })
        );
    }
}
