use drillscene_camera::{Camera, CameraMovement};
use drillscene_scene::PolygonMode;
use glam::Vec3;

/// Where the camera starts and where [`Action::ResetCamera`] sends it.
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// A high-level action produced by the host's input handlers.
///
/// The camera and renderer consume actions, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate along one camera axis (polled every frame while held).
    Move(CameraMovement),
    /// Pointer offsets, vertical already inverted.
    Look { xoffset: f32, yoffset: f32 },
    /// Scroll delta in wheel lines.
    Zoom(f32),
    SetPolygonMode(PolygonMode),
    /// Return the camera to [`HOME_POSITION`] facing -Z.
    ResetCamera,
    ToggleHud,
    Quit,
}

impl Action {
    /// Look action from a relative mouse delta (device units, Y down).
    pub fn from_mouse_motion(dx: f64, dy: f64) -> Self {
        Action::Look {
            xoffset: dx as f32,
            yoffset: -dy as f32,
        }
    }

    /// Apply camera-affecting actions. Returns `false` for actions the camera
    /// does not handle, leaving them to the host.
    pub fn apply_to_camera(self, camera: &mut Camera, dt: f32) -> bool {
        match self {
            Action::Move(direction) => camera.process_movement(direction, dt),
            Action::Look { xoffset, yoffset } => camera.process_rotation(xoffset, yoffset, true),
            Action::Zoom(lines) => camera.process_zoom(lines),
            Action::ResetCamera => {
                tracing::debug!("camera reset to home");
                camera.reset(HOME_POSITION);
            }
            Action::SetPolygonMode(_) | Action::ToggleHud | Action::Quit => return false,
        }
        true
    }
}

/// Movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldMovements {
    held: [bool; 4],
}

impl HeldMovements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: CameraMovement, pressed: bool) {
        self.held[Self::slot(direction)] = pressed;
    }

    pub fn is_held(&self, direction: CameraMovement) -> bool {
        self.held[Self::slot(direction)]
    }

    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    /// Held directions in polling order.
    pub fn iter(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        CameraMovement::ALL
            .into_iter()
            .filter(|direction| self.is_held(*direction))
    }

    /// One `process_movement` call per held direction.
    pub fn apply(&self, camera: &mut Camera, dt: f32) {
        for direction in self.iter() {
            camera.process_movement(direction, dt);
        }
    }

    fn slot(direction: CameraMovement) -> usize {
        match direction {
            CameraMovement::Forward => 0,
            CameraMovement::Backward => 1,
            CameraMovement::Left => 2,
            CameraMovement::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_motion_inverts_vertical() {
        assert_eq!(
            Action::from_mouse_motion(4.0, 3.0),
            Action::Look {
                xoffset: 4.0,
                yoffset: -3.0
            }
        );
    }

    #[test]
    fn held_movements_track_press_and_release() {
        let mut held = HeldMovements::new();
        held.set(CameraMovement::Left, true);
        held.set(CameraMovement::Forward, true);
        assert_eq!(
            held.iter().collect::<Vec<_>>(),
            vec![CameraMovement::Forward, CameraMovement::Left]
        );
        held.set(CameraMovement::Forward, false);
        assert!(!held.is_held(CameraMovement::Forward));
        held.clear();
        assert_eq!(held.iter().count(), 0);
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let mut camera = Camera::at(HOME_POSITION);
        let mut held = HeldMovements::new();
        held.set(CameraMovement::Forward, true);
        held.set(CameraMovement::Backward, true);
        held.apply(&mut camera, 0.5);
        assert!(camera.position.abs_diff_eq(HOME_POSITION, 1e-6));
    }

    // Diagonal speed exceeds axial speed by √2; expected, not a defect.
    #[test]
    fn diagonal_keys_are_faster_than_axial() {
        let mut axial = Camera::at(Vec3::ZERO);
        let mut diagonal = Camera::at(Vec3::ZERO);

        let mut held = HeldMovements::new();
        held.set(CameraMovement::Forward, true);
        held.apply(&mut axial, 1.0);
        held.set(CameraMovement::Right, true);
        held.apply(&mut diagonal, 1.0);

        let ratio = diagonal.position.length() / axial.position.length();
        assert!((ratio - std::f32::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn reset_action_returns_home() {
        let mut camera = Camera::at(HOME_POSITION);
        Action::Look {
            xoffset: 300.0,
            yoffset: -120.0,
        }
        .apply_to_camera(&mut camera, 0.0);
        Action::Move(CameraMovement::Forward).apply_to_camera(&mut camera, 2.0);

        assert!(Action::ResetCamera.apply_to_camera(&mut camera, 0.0));
        assert_eq!(camera.position, HOME_POSITION);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn look_action_is_pitch_constrained() {
        let mut camera = Camera::default();
        Action::Look {
            xoffset: 0.0,
            yoffset: 5000.0,
        }
        .apply_to_camera(&mut camera, 0.0);
        assert_eq!(camera.pitch(), 89.0);
    }

    #[test]
    fn zoom_action_narrows_fov() {
        let mut camera = Camera::default();
        assert!(Action::Zoom(2.0).apply_to_camera(&mut camera, 0.0));
        assert_eq!(camera.zoom(), 43.0);
    }

    #[test]
    fn host_actions_are_not_consumed() {
        let mut camera = Camera::default();
        let before = camera.clone();
        assert!(!Action::Quit.apply_to_camera(&mut camera, 1.0));
        assert!(!Action::ToggleHud.apply_to_camera(&mut camera, 1.0));
        assert!(!Action::SetPolygonMode(PolygonMode::Line).apply_to_camera(&mut camera, 1.0));
        assert_eq!(camera, before);
    }
}
