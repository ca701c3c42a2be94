//! Per-frame work: config snapshot, pointer forcing, frame driver tick.

use std::time::{Duration, Instant};

use fluidfx_renderer::{FrameInputs, FrameOutcome};

use super::core::FluidFxApp;

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

impl FluidFxApp {
    /// Render one frame and schedule the next.
    pub(super) fn render_frame(&mut self, now: Instant) {
        self.sync_config();

        let Some(ref mut driver) = self.driver else {
            return;
        };

        self.timer.begin_frame_at(now);
        let inputs = FrameInputs::new(self.config.effect.clone())
            .with_pointer(
                self.pointer
                    .forcing(now, self.config.pointer.idle_timeout()),
            )
            .with_time(self.timer.elapsed_secs(now));
        self.pointer.end_frame();

        match driver.render_frame(&inputs) {
            Ok(FrameOutcome::Presented { .. }) => {}
            Ok(FrameOutcome::Stopped) => return,
            Err(e) => tracing::error!("Dropped frame {}: {e}", driver.frame()),
        }

        if let Some(fps) = self.timer.report_due(now, FPS_REPORT_INTERVAL) {
            tracing::debug!(
                "{fps:.1} fps ({:.2} ms/frame over {} frames)",
                self.timer.frame_time_ms(),
                self.timer.sample_count()
            );
        }

        self.request_redraw();
    }

    /// Adopt the latest reloaded config, if any.
    pub(super) fn sync_config(&mut self) {
        let Some(ref mut rx) = self.config_rx else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {
                self.config = rx.borrow_and_update().clone();
                tracing::info!("Config reloaded");
            }
            Ok(false) => {}
            Err(_) => {
                tracing::debug!("Config reload channel closed");
                self.config_rx = None;
            }
        }
    }
}
