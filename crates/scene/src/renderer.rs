use crate::frame::SceneFrame;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a composed frame and produces output. It never
/// touches the camera; view state arrives already resolved in the frame.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one composed frame.
    fn render(&self, frame: &SceneFrame) -> Self::Output;
}

/// Text renderer for headless runs.
///
/// Produces a human-readable dump of the frame. Useful for CLI output,
/// logging, and testing the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &SceneFrame) -> String {
        let eye = frame.view_pos;
        // Camera-space -Z is the view direction; the inverse view maps it back.
        let forward = frame.view.inverse().transform_vector3(glam::Vec3::NEG_Z);
        let light = frame.light.position;
        let color = frame.sphere_color;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (t={:.3}s, mode={}) ===\n",
            frame.elapsed,
            frame.polygon_mode.label()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.3}, {:.3}, {:.3}) fov={:.1}\n",
            eye.x, eye.y, eye.z, forward.x, forward.y, forward.z, frame.fov_degrees
        ));
        out.push_str(&format!(
            "Light: pos=({:.2}, {:.2}, {:.2})\n",
            light.x, light.y, light.z
        ));
        out.push_str(&format!(
            "Sphere color: ({:.3}, {:.3}, {:.3})\n",
            color.x, color.y, color.z
        ));
        out
    }
}
