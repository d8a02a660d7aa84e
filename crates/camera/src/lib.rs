//! First-person fly camera.
//!
//! Converts accumulated yaw/pitch Euler angles and raw pointer/keyboard
//! deltas into an orthonormal basis (front/right/up) and a view matrix.
//!
//! # Invariants
//! - `front`, `right`, `up` form a right-handed orthonormal basis consistent
//!   with the current yaw/pitch. The basis is rebuilt from scratch after every
//!   orientation change and is never left stale.
//! - Pitch is clamped to ±89° only on the pointer-rotation path. Construction,
//!   reset and direct orientation overrides store the angles as given.
//! - Zoom (vertical field of view, degrees) stays within `[1, 45]` on the
//!   scroll path.
//! - The camera owns no external resources and has no fallible operations.

mod camera;

pub use camera::{
    Camera, CameraMovement, CameraState, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED,
    DEFAULT_YAW, DEFAULT_ZOOM, PITCH_LIMIT, ZOOM_MAX, ZOOM_MIN,
};

pub fn crate_info() -> &'static str {
    "drillscene-camera v0.1.0"
}
