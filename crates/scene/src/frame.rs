use drillscene_camera::Camera;
use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::light::PointLight;
use crate::palette;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Fixed yaw of the lit objects about +Y, in degrees.
pub const OBJECT_YAW_DEGREES: f32 = 45.0;

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
}

impl PolygonMode {
    pub fn label(self) -> &'static str {
        match self {
            PolygonMode::Fill => "fill",
            PolygonMode::Line => "line",
        }
    }
}

/// Everything a renderer needs for one frame.
///
/// Compose only after all of the frame's input has been applied to the
/// camera; the result is valid for that frame alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_pos: Vec3,
    pub fov_degrees: f32,
    pub light: PointLight,
    pub sphere_color: Vec3,
    /// Transform shared by the sphere and the drill.
    pub object_transform: Mat4,
    pub lamp_model: Mat4,
    pub clear_color: Vec4,
    pub polygon_mode: PolygonMode,
    pub elapsed: f32,
}

impl SceneFrame {
    pub fn compose(camera: &Camera, aspect: f32, elapsed: f32) -> Self {
        let light = PointLight::orbiting(elapsed);
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect, NEAR_PLANE, FAR_PLANE),
            view_pos: camera.position,
            fov_degrees: camera.zoom(),
            light,
            sphere_color: palette::sphere_color(elapsed),
            object_transform: Mat4::from_rotation_y(OBJECT_YAW_DEGREES.to_radians()),
            lamp_model: light.lamp_model(),
            clear_color: palette::clear_color(),
            polygon_mode: PolygonMode::Fill,
            elapsed,
        }
    }

    pub fn with_polygon_mode(mut self, mode: PolygonMode) -> Self {
        self.polygon_mode = mode;
        self
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Inverse-transpose of the upper 3x3, widened back to 4x4 for uniform upload.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_reads_camera_state() {
        let mut camera = Camera::at(Vec3::new(0.0, 0.0, 5.0));
        camera.process_zoom(5.0);
        let frame = SceneFrame::compose(&camera, 1.0, 0.0);

        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.view_pos, camera.position);
        assert_eq!(frame.fov_degrees, 40.0);
        assert_eq!(
            frame.projection,
            camera.projection_matrix(1.0, NEAR_PLANE, FAR_PLANE)
        );
        assert_eq!(frame.polygon_mode, PolygonMode::Fill);
    }

    #[test]
    fn compose_animates_light() {
        let camera = Camera::default();
        let a = SceneFrame::compose(&camera, 1.0, 0.0);
        let b = SceneFrame::compose(&camera, 1.0, 1.5);
        assert_ne!(a.light.position, b.light.position);
        assert_eq!(b.lamp_model, b.light.lamp_model());
    }

    #[test]
    fn object_transform_rotates_about_y() {
        let frame = SceneFrame::compose(&Camera::default(), 1.0, 0.0);
        let x = frame.object_transform.transform_vector3(Vec3::X);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert!(x.abs_diff_eq(Vec3::new(half, 0.0, -half), 1e-6));
    }

    #[test]
    fn view_projection_order() {
        let frame = SceneFrame::compose(&Camera::at(Vec3::new(1.0, 2.0, 3.0)), 1.5, 0.2);
        assert_eq!(frame.view_projection(), frame.projection * frame.view);
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let m = Mat4::from_rotation_y(0.7);
        assert!(normal_matrix(m).abs_diff_eq(m, 1e-5));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let m = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(m).transform_vector3(Vec3::X);
        assert!(n.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn polygon_mode_override() {
        let frame =
            SceneFrame::compose(&Camera::default(), 1.0, 0.0).with_polygon_mode(PolygonMode::Line);
        assert_eq!(frame.polygon_mode.label(), "line");
    }
}
