//! Window creation and renderer initialization.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use fluidfx_common::PhysicalSize;
use fluidfx_renderer::{FrameDriver, GpuContext, RenderError, WgpuBackend};

use super::core::FluidFxApp;

impl FluidFxApp {
    /// Create the window and the GPU frame driver.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width as f64,
                window_config.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        match create_driver(window.clone(), window_config.vsync) {
            Ok(driver) => {
                self.driver = Some(driver);
                self.window = Some(window);
                true
            }
            Err(e) => {
                tracing::error!("Failed to initialize renderer: {e}");
                false
            }
        }
    }
}

fn create_driver(
    window: Arc<winit::window::Window>,
    vsync: bool,
) -> Result<FrameDriver<WgpuBackend>, RenderError> {
    let inner = window.inner_size();
    let size = PhysicalSize::new(inner.width, inner.height);
    let gpu = pollster::block_on(GpuContext::new(window, vsync))?;
    let backend = WgpuBackend::new(gpu)?;
    FrameDriver::new(backend, size)
}
