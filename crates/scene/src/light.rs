use glam::{Mat4, Vec3};

/// Warm white shared by the light, the lamp marker and the clear colour.
pub const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.98039, 0.88392157);

/// Horizontal radius of the light's orbit.
pub const ORBIT_RADIUS: f32 = 5.0;
/// Vertical swing of the light.
pub const ORBIT_HEIGHT: f32 = 2.0;

/// Uniform scale of the lamp marker cube.
pub const LAMP_SCALE: f32 = 0.2;

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

impl PointLight {
    /// Light at its orbit position for `elapsed` seconds since start.
    pub fn orbiting(elapsed: f32) -> Self {
        Self {
            position: orbit_position(elapsed),
            color: LIGHT_COLOR,
        }
    }

    /// Model matrix of the small cube drawn at the light.
    pub fn lamp_model(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(LAMP_SCALE))
    }
}

/// Orbit around the Y axis, bobbing up and down in phase with X.
pub fn orbit_position(elapsed: f32) -> Vec3 {
    let (sin, cos) = elapsed.sin_cos();
    Vec3::new(ORBIT_RADIUS * cos, ORBIT_HEIGHT * cos, ORBIT_RADIUS * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_starts_on_positive_x() {
        let p = orbit_position(0.0);
        assert!(p.abs_diff_eq(Vec3::new(5.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn orbit_stays_on_radius() {
        for i in 0..64 {
            let p = orbit_position(i as f32 * 0.37);
            let horizontal = Vec3::new(p.x, 0.0, p.z).length();
            assert!((horizontal - ORBIT_RADIUS).abs() < 1e-4);
            assert!(p.y.abs() <= ORBIT_HEIGHT + 1e-6);
        }
    }

    #[test]
    fn lamp_model_scales_then_translates() {
        let light = PointLight::orbiting(1.0);
        let model = light.lamp_model();
        let corner = model.transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(light.position + Vec3::splat(0.1), 1e-5));
    }
}
