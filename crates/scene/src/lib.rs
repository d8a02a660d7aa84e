//! Scene description: what gets drawn each frame, independent of the GPU API.
//!
//! Three drawables share one moving point light: a generated UV sphere, a
//! hand-authored hexagonal "drill" prism with per-vertex colours, and a small
//! cube marking the light.
//!
//! # Invariants
//! - Geometry is generated once on the CPU and is static afterwards.
//! - A [`SceneFrame`] is composed after the frame's input was applied and is
//!   valid for that frame only.
//! - Renderers read frames; they never mutate the camera.

pub mod light;
pub mod mesh;
pub mod palette;

mod frame;
mod renderer;

pub use frame::{FAR_PLANE, NEAR_PLANE, OBJECT_YAW_DEGREES, PolygonMode, SceneFrame, normal_matrix};
pub use light::{LIGHT_COLOR, PointLight};
pub use mesh::{
    ColoredVertex, DEFAULT_SPHERE_SEGMENTS, GeometryError, Mesh, Vertex, drill_mesh,
    lamp_cube_mesh, sphere_mesh,
};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "drillscene-scene v0.1.0"
}
