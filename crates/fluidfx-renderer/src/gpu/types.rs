use fluidfx_common::{FluidFxError, PhysicalSize};

/// Errors raised at the GPU/CPU resource boundary.
///
/// Every variant is fatal for the operation that produced it; nothing is
/// silently downgraded to a different format or a blank frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    SurfaceError(String),

    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("device error: {0}")]
    DeviceError(String),

    #[error("shader compilation failed for {program}: {message}")]
    ShaderCompilation {
        program: &'static str,
        message: String,
    },

    #[error("render target allocation failed at {}x{}: {message}", size.width, size.height)]
    TargetAllocation { size: PhysicalSize, message: String },

    #[error("unsupported render target format: {0}")]
    UnsupportedFormat(String),

    #[error(
        "render target size mismatch: expected {}x{}, got {}x{}",
        expected.width, expected.height, actual.width, actual.height
    )]
    SizeMismatch {
        expected: PhysicalSize,
        actual: PhysicalSize,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RenderError::SurfaceError(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceError(e.to_string())
    }
}

impl From<RenderError> for FluidFxError {
    fn from(e: RenderError) -> Self {
        FluidFxError::Renderer(e.to_string())
    }
}
