//! Windowless rendering on the CPU backend.
//!
//! Runs the frame driver for a fixed number of frames on a 60 Hz virtual
//! clock and writes the last presented frame as PNG.

use std::f32::consts::TAU;
use std::path::PathBuf;

use fluidfx_common::PhysicalSize;
use fluidfx_config::FluidFxConfig;
use fluidfx_renderer::{
    CpuBackend, FrameDriver, FrameInputs, FrameOutcome, PointerForcing, RenderError,
};

/// Virtual frame rate of the headless clock.
const FRAME_RATE: f32 = 60.0;
/// Sweep angle advanced per frame, in radians.
const SWEEP_STEP: f32 = TAU / 120.0;
/// Sweep radius as a fraction of the shorter surface side.
const SWEEP_RADIUS: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub frames: u64,
    pub size: PhysicalSize,
    pub output: PathBuf,
    pub sweep: bool,
}

/// Render `options.frames` frames and save the result.
pub fn run(options: &HeadlessOptions, config: &FluidFxConfig) -> Result<(), RenderError> {
    let size = options.size.non_zero();
    let mut driver = FrameDriver::new(CpuBackend::new(size)?, size)?;
    tracing::info!(
        "Rendering {} headless frames at {}x{}",
        options.frames,
        size.width,
        size.height
    );

    for frame in 0..options.frames {
        let mut inputs =
            FrameInputs::new(config.effect.clone()).with_time(frame as f32 / FRAME_RATE);
        if options.sweep {
            inputs = inputs.with_pointer(sweep_forcing(frame, size));
        }
        if let FrameOutcome::Stopped = driver.render_frame(&inputs)? {
            break;
        }
    }

    driver.backend().framebuffer().save_png(&options.output)?;
    driver.stop();
    Ok(())
}

/// Pointer moving counter-clockwise on a circle around the surface centre.
pub fn sweep_forcing(frame: u64, size: PhysicalSize) -> PointerForcing {
    let centre = [size.width as f32 * 0.5, size.height as f32 * 0.5];
    let radius = size.width.min(size.height) as f32 * SWEEP_RADIUS;
    let at = |angle: f32| [centre[0] + radius * angle.cos(), centre[1] + radius * angle.sin()];
    let angle = frame as f32 * SWEEP_STEP;
    PointerForcing {
        position: at(angle),
        previous: at(angle - SWEEP_STEP),
        active: 1.0,
    }
}
