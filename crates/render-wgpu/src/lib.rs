//! wgpu render backend for the drill scene.
//!
//! Draws the lit sphere, the vertex-coloured drill and the lamp marker from a
//! composed [`SceneFrame`](drillscene_scene::SceneFrame). Geometry is uploaded
//! once at construction; per frame only uniforms change.
//!
//! # Invariants
//! - Renderer never mutates camera state.
//! - Line rasterization is only used when the device supports it; otherwise
//!   frames fall back to fill.

mod context;
mod error;
mod gpu;
mod shaders;

pub use context::GpuContext;
pub use error::RenderError;
pub use gpu::SceneRenderer;
