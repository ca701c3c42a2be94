//! Graceful shutdown: stop the frame loop, release GPU resources, stop
//! config reloading.

use std::time::Duration;

use super::core::FluidFxApp;

impl FluidFxApp {
    /// Stop all subsystems. Safe to call more than once.
    ///
    /// The driver is stopped before the window is dropped so its surface and
    /// targets are released while the window still exists.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");
        self.should_exit = true;

        if let Some(mut driver) = self.driver.take() {
            driver.stop();
        }

        self.config_rx = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.window = None;
        tracing::info!("Graceful shutdown complete");
    }
}
