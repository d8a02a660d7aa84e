use glam::{Vec3, Vec4};

use crate::light::LIGHT_COLOR;

/// Ambient strength of the uniformly coloured sphere.
pub const SPHERE_AMBIENT: f32 = 0.15;
/// Ambient strength of the vertex-coloured drill.
pub const DRILL_AMBIENT: f32 = 0.2;

/// Background: the complement of the light colour with the red channel zeroed.
pub fn clear_color() -> Vec4 {
    Vec4::new(0.0, 1.0 - LIGHT_COLOR.y, 1.0 - LIGHT_COLOR.z, 1.0)
}

/// Sphere colour cycling over time. Each channel stays within `[0, 1]`.
pub fn sphere_color(elapsed: f32) -> Vec3 {
    let r = (elapsed * 2.0).sin() / 2.0 + 0.5;
    let g = (elapsed + r.cos()).sin() / 2.0 + 0.5;
    let b = (elapsed * 4.0 + (2.0 * g).cos()).sin() / 2.0 + 0.5;
    Vec3::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_color_in_unit_range() {
        for i in 0..500 {
            let c = sphere_color(i as f32 * 0.113);
            for ch in c.to_array() {
                assert!((0.0..=1.0).contains(&ch), "channel out of range: {ch}");
            }
        }
    }

    #[test]
    fn sphere_color_at_start() {
        let c = sphere_color(0.0);
        assert!((c.x - 0.5).abs() < 1e-6);
        let g = 0.5_f32.cos().sin() / 2.0 + 0.5;
        assert!((c.y - g).abs() < 1e-6);
    }

    #[test]
    fn clear_color_is_opaque_teal() {
        let c = clear_color();
        assert_eq!(c.x, 0.0);
        assert!(c.y > 0.0 && c.y < 0.05);
        assert!(c.z > 0.1 && c.z < 0.2);
        assert_eq!(c.w, 1.0);
    }
}
