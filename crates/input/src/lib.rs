//! Input mapping between the windowing layer and the camera.
//!
//! # Invariants
//! - Actions are windowing-system independent; the desktop host maps raw key
//!   codes onto them.
//! - Vertical pointer deltas are inverted here, at the boundary, never inside
//!   the camera.
//! - Held movement keys are applied once per direction per frame, in a fixed
//!   order, without normalizing diagonals.

pub mod action;
pub mod pointer;

pub use action::{Action, HOME_POSITION, HeldMovements};
pub use pointer::PointerTracker;

pub fn crate_info() -> &'static str {
    "drillscene-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
