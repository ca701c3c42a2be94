use fluidfx_config::EffectConfig;

use crate::pointer::PointerForcing;

/// Everything one frame reads from outside the driver.
///
/// The effect config is a snapshot taken by value, so edits made while a
/// frame is in flight only show up on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInputs {
    pub effect: EffectConfig,
    pub pointer: PointerForcing,
    /// Seconds since start, fed to the composite pass.
    pub time: f32,
}

impl FrameInputs {
    pub fn new(effect: EffectConfig) -> Self {
        Self {
            effect,
            pointer: PointerForcing::NEUTRAL,
            time: 0.0,
        }
    }

    pub fn with_pointer(mut self, pointer: PointerForcing) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }
}

/// Result of a successful [`super::FrameDriver::render_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Both passes ran; `frame` is the counter value the frame used.
    Presented { frame: u64 },
    /// The driver was stopped; nothing was rendered.
    Stopped,
}
