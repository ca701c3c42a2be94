//! FluidFxApp struct definition and constructor.

use std::sync::Arc;

use tokio::sync::watch;
use winit::window::Window;

use fluidfx_config::FluidFxConfig;
use fluidfx_renderer::{FrameDriver, FrameTimer, PointerState, WgpuBackend};

/// Top-level application state.
pub struct FluidFxApp {
    pub(super) config: FluidFxConfig,
    pub(super) config_rx: Option<watch::Receiver<FluidFxConfig>>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) driver: Option<FrameDriver<WgpuBackend>>,

    pub(super) pointer: PointerState,
    pub(super) timer: FrameTimer,

    pub(super) should_exit: bool,
}

impl FluidFxApp {
    /// `config_rx` delivers live reloads; `tokio_runtime` keeps the reload
    /// task alive for the lifetime of the app.
    pub fn new(
        config: FluidFxConfig,
        config_rx: Option<watch::Receiver<FluidFxConfig>>,
        tokio_runtime: Option<tokio::runtime::Runtime>,
    ) -> Self {
        Self {
            config,
            config_rx,
            tokio_runtime,
            window: None,
            driver: None,
            pointer: PointerState::new(),
            timer: FrameTimer::new(),
            should_exit: false,
        }
    }

    pub(super) fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
