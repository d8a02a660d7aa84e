use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Initial yaw in degrees. Together with zero pitch the camera looks down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
/// World units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch bound applied by [`Camera::process_rotation`] when constrained.
/// At ±90° `front` becomes parallel to `world_up` and `right` degenerates.
pub const PITCH_LIMIT: f32 = 89.0;
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 45.0;

/// Discrete translational input, independent of any windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

impl CameraMovement {
    /// All directions in the order the host polls them each frame.
    pub const ALL: [CameraMovement; 4] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
    ];
}

/// Fly camera driven by Euler angles.
///
/// `yaw` and `pitch` (degrees) are the authoritative orientation; `front`,
/// `right` and `up` are derived from them and kept private so they can only
/// change through an operation that rebuilds all three.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye location in world space.
    pub position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    /// World units per second applied to movement input.
    pub movement_speed: f32,
    /// Multiplier on raw pointer deltas before they reach yaw/pitch.
    pub mouse_sensitivity: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl Camera {
    /// Create a camera. Angles are stored as given: no pitch clamp happens here.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up,
            yaw,
            pitch,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Camera at `position` with +Y world up and default orientation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at transform for eye = position, target = position + front.
    ///
    /// Not cached: position and basis may change between frames.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using the current zoom as vertical FOV.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, near, far)
    }

    /// Translate along `front` or `right` by `movement_speed * elapsed_seconds`.
    ///
    /// One direction per call. Several calls in the same frame are not
    /// normalized, so diagonal movement is up to √2 faster than axial.
    pub fn process_movement(&mut self, direction: CameraMovement, elapsed_seconds: f32) {
        let velocity = self.movement_speed * elapsed_seconds;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Accumulate pointer deltas into yaw/pitch.
    ///
    /// The caller inverts the vertical delta so that moving the pointer up
    /// increases pitch. With `constrain_pitch` the result is clamped to
    /// ±[`PITCH_LIMIT`].
    pub fn process_rotation(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow (positive) or widen (negative) the field of view.
    pub fn process_zoom(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Relocate to `position` and return to the home orientation.
    pub fn reset(&mut self, position: Vec3) {
        tracing::trace!(?position, "camera reset");
        self.position = position;
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
        self.update_vectors();
    }

    /// Overwrite yaw/pitch directly. No clamp is applied.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        tracing::trace!(yaw, pitch, "camera orientation override");
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_vectors();
    }

    /// Serializable snapshot of the current state.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            front: self.front,
            right: self.right,
            up: self.up,
            yaw: self.yaw,
            pitch: self.pitch,
            zoom: self.zoom,
        }
    }

    // Basis is derived from yaw/pitch alone; nothing accumulates between calls.
    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Point-in-time copy of a camera's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, EPS), "{a:?} != {b:?}");
    }

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f:?}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r:?}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u:?}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up == -front
        assert_vec_near(r.cross(u), -f);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::ZERO);
        assert_eq!(cam.world_up(), Vec3::Y);
        assert_eq!(cam.yaw(), DEFAULT_YAW);
        assert_eq!(cam.pitch(), DEFAULT_PITCH);
        assert_eq!(cam.movement_speed, 2.5);
        assert_eq!(cam.mouse_sensitivity, 0.1);
        assert_eq!(cam.zoom(), 45.0);
        assert_vec_near(cam.front(), Vec3::NEG_Z);
        assert_vec_near(cam.right(), Vec3::X);
        assert_vec_near(cam.up(), Vec3::Y);
    }

    #[test]
    fn basis_is_orthonormal_across_orientations() {
        let mut yaw = -720.0_f32;
        while yaw <= 720.0 {
            let mut pitch = -89.0_f32;
            while pitch <= 89.0 {
                let cam = Camera::new(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&cam);
                pitch += 1.0;
            }
            yaw += 7.5;
        }
    }

    #[test]
    fn rotation_by_zero_is_idempotent() {
        let mut cam = Camera::new(Vec3::new(1.0, -2.0, 3.0), Vec3::Y, 33.0, -12.0);
        let before = cam.clone();
        cam.process_rotation(0.0, 0.0, true);
        assert_eq!(cam, before);
    }

    #[test]
    fn rotation_scales_by_sensitivity() {
        let mut cam = Camera::default();
        cam.process_rotation(100.0, 50.0, true);
        assert!((cam.yaw() - (DEFAULT_YAW + 10.0)).abs() < 1e-4);
        assert!((cam.pitch() - 5.0).abs() < 1e-4);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_clamps_at_upper_bound() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.process_rotation(0.0, 100.0, true);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), 89.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_clamps_at_lower_bound() {
        let mut cam = Camera::default();
        cam.process_rotation(0.0, -10_000.0, true);
        assert_eq!(cam.pitch(), -89.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn unconstrained_rotation_passes_the_limit() {
        let mut cam = Camera::default();
        cam.process_rotation(0.0, 950.0, false);
        assert!((cam.pitch() - 95.0).abs() < 1e-3);
    }

    #[test]
    fn construction_does_not_clamp_pitch() {
        let cam = Camera::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, 120.0);
        assert_eq!(cam.pitch(), 120.0);
    }

    #[test]
    fn set_orientation_does_not_clamp_and_rebuilds_basis() {
        let mut cam = Camera::default();
        cam.set_orientation(0.0, 95.0);
        assert_eq!(cam.pitch(), 95.0);
        let expected = Camera::new(Vec3::ZERO, Vec3::Y, 0.0, 95.0);
        assert_eq!(cam.front(), expected.front());
        assert_eq!(cam.up(), expected.up());
    }

    #[test]
    fn zoom_floors_at_one() {
        let mut cam = Camera::default();
        for _ in 0..100 {
            cam.process_zoom(3.0);
            assert!(cam.zoom() >= ZOOM_MIN);
        }
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn zoom_ceils_at_forty_five() {
        let mut cam = Camera::default();
        cam.process_zoom(10.0);
        assert_eq!(cam.zoom(), 35.0);
        for _ in 0..100 {
            cam.process_zoom(-2.0);
            assert!(cam.zoom() <= ZOOM_MAX);
        }
        assert_eq!(cam.zoom(), 45.0);
    }

    #[test]
    fn zoom_leaves_basis_alone() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 10.0, 20.0);
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        cam.process_zoom(5.0);
        assert_eq!((cam.front(), cam.right(), cam.up()), (f, r, u));
    }

    #[test]
    fn forward_movement_from_home() {
        let mut cam = Camera::at(Vec3::new(0.0, 0.0, 5.0));
        cam.process_movement(CameraMovement::Forward, 1.0);
        assert_vec_near(cam.position, Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn opposite_movements_cancel() {
        let mut cam = Camera::new(Vec3::new(1.0, 1.0, 1.0), Vec3::Y, 40.0, 15.0);
        let start = cam.position;
        cam.process_movement(CameraMovement::Left, 0.3);
        cam.process_movement(CameraMovement::Right, 0.3);
        cam.process_movement(CameraMovement::Backward, 0.7);
        cam.process_movement(CameraMovement::Forward, 0.7);
        assert_vec_near(cam.position, start);
    }

    #[test]
    fn strafe_moves_along_right() {
        let mut cam = Camera::at(Vec3::ZERO);
        cam.process_movement(CameraMovement::Right, 2.0);
        assert_vec_near(cam.position, Vec3::new(5.0, 0.0, 0.0));
    }

    // Known limitation kept on purpose: two directions in one frame add up
    // without normalization.
    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut cam = Camera::at(Vec3::ZERO);
        cam.process_movement(CameraMovement::Forward, 1.0);
        cam.process_movement(CameraMovement::Right, 1.0);
        let expected = DEFAULT_SPEED * std::f32::consts::SQRT_2;
        assert!((cam.position.length() - expected).abs() < EPS);
    }

    #[test]
    fn movement_does_not_touch_orientation() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 12.0, 34.0);
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        cam.process_movement(CameraMovement::Backward, 0.5);
        assert_eq!((cam.front(), cam.right(), cam.up()), (f, r, u));
        assert_eq!((cam.yaw(), cam.pitch()), (12.0, 34.0));
    }

    #[test]
    fn reset_restores_home_orientation() {
        let mut cam = Camera::at(Vec3::new(0.0, 0.0, 5.0));
        cam.process_rotation(431.0, 277.0, true);
        cam.process_movement(CameraMovement::Forward, 3.0);
        cam.process_movement(CameraMovement::Left, 1.0);

        cam.reset(Vec3::new(1.0, 2.0, 3.0));

        let home = Camera::default();
        assert_eq!(cam.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.front(), home.front());
        assert_eq!(cam.right(), home.right());
        assert_eq!(cam.up(), home.up());
    }

    #[test]
    fn reset_keeps_zoom_and_tunables() {
        let mut cam = Camera::default();
        cam.movement_speed = 7.0;
        cam.process_zoom(20.0);
        cam.reset(Vec3::ZERO);
        assert_eq!(cam.zoom(), 25.0);
        assert_eq!(cam.movement_speed, 7.0);
    }

    #[test]
    fn view_matrix_matches_independent_look_at() {
        let mut cam = Camera::new(Vec3::new(3.0, -1.0, 7.0), Vec3::Y, 17.0, 0.0);
        cam.process_rotation(-55.0, 230.0, true);

        let eye = cam.position;
        let f = ((eye + cam.front()) - eye).normalize();
        let s = f.cross(cam.up()).normalize();
        let u = s.cross(f);
        let expected = Mat4::from_cols_array(&[
            s.x,
            u.x,
            -f.x,
            0.0,
            s.y,
            u.y,
            -f.y,
            0.0,
            s.z,
            u.z,
            -f.z,
            0.0,
            -s.dot(eye),
            -u.dot(eye),
            f.dot(eye),
            1.0,
        ]);

        assert!(cam.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let cam = Camera::new(Vec3::new(4.0, 5.0, 6.0), Vec3::Y, 80.0, -30.0);
        let eye_in_view = cam.view_matrix().transform_point3(cam.position);
        assert_vec_near(eye_in_view, Vec3::ZERO);
        let ahead = cam.view_matrix().transform_point3(cam.position + cam.front());
        assert_vec_near(ahead, Vec3::NEG_Z);
    }

    #[test]
    fn projection_uses_zoom_as_fov() {
        let mut cam = Camera::default();
        cam.process_zoom(15.0);
        let expected = Mat4::perspective_rh(30.0_f32.to_radians(), 1.0, 0.1, 100.0);
        assert_eq!(cam.projection_matrix(1.0, 0.1, 100.0), expected);
    }

    #[test]
    fn state_snapshot_serializes() {
        let cam = Camera::at(Vec3::new(0.0, 0.0, 5.0));
        let state = cam.state();
        assert_eq!(state.position, cam.position);
        assert_eq!(state.front, cam.front());
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"yaw\":-90.0"));
        assert!(json.contains("\"zoom\":45.0"));
    }
}
