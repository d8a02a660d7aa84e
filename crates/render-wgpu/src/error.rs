use drillscene_scene::PolygonMode;

/// Errors from GPU setup and renderer configuration.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("polygon mode `{}` needs a device feature this adapter lacks", .0.label())]
    PolygonModeUnsupported(PolygonMode),
}
