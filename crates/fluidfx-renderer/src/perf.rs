//! Frame timing and the elapsed clock of the composite pass.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::gpu::TIME_WRAP_SECS;

const MAX_SAMPLES: usize = 120;

/// Rolling window of frame durations plus a periodic FPS report.
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    started: Instant,
    last_frame: Instant,
    last_report: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(MAX_SAMPLES),
            started: now,
            last_frame: now,
            last_report: now,
        }
    }

    /// Record the start of a frame rendered at `now`. Call once per frame.
    pub fn begin_frame_at(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_times.push_back(dt);
        if self.frame_times.len() > MAX_SAMPLES {
            self.frame_times.pop_front();
        }
    }

    /// Seconds since the timer started, wrapped at [`TIME_WRAP_SECS`], for
    /// the composite time uniform.
    ///
    /// The wrap happens in f64 so long uptimes keep sub-millisecond steps.
    pub fn elapsed_secs(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        elapsed.rem_euclid(f64::from(TIME_WRAP_SECS)) as f32
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().map(|d| d.as_secs_f64()).sum();
        (total / self.frame_times.len() as f64) * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Current FPS if at least `interval` passed since the last report.
    pub fn report_due(&mut self, now: Instant, interval: Duration) -> Option<f64> {
        if now.saturating_duration_since(self.last_report) < interval {
            return None;
        }
        self.last_report = now;
        Some(self.fps())
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
