//! Execution engines for the simulation and composite passes.
//!
//! The frame driver only talks to [`RenderBackend`]; the CPU backend runs the
//! reference kernels in Rust and the wgpu backend runs the WGSL programs.

mod cpu;
mod wgpu_backend;

pub use cpu::*;
pub use wgpu_backend::*;

use fluidfx_common::PhysicalSize;

use crate::gpu::{CompositeUniforms, RenderError, SimulationUniforms};
use crate::targets::RenderTarget;

pub trait RenderBackend {
    type Target: RenderTarget;

    /// Allocate one floating-point RGBA target. Never falls back to a
    /// lower-precision format.
    fn create_target(&mut self, size: PhysicalSize) -> Result<Self::Target, RenderError>;

    fn release_target(&mut self, target: Self::Target);

    /// Resize the presented surface.
    fn resize_surface(&mut self, size: PhysicalSize) -> Result<(), RenderError>;

    /// Run the simulation pass, reading `previous` and writing `current`.
    fn simulate(
        &mut self,
        previous: &Self::Target,
        current: &mut Self::Target,
        uniforms: &SimulationUniforms,
    ) -> Result<(), RenderError>;

    /// Run the composite pass from `fluid` onto the presented surface.
    fn composite(
        &mut self,
        fluid: &Self::Target,
        uniforms: &CompositeUniforms,
    ) -> Result<(), RenderError>;

    /// Release the pass programs. Safe to call more than once and after a
    /// partial initialization.
    fn release(&mut self);
}

/// Fail unless `actual` matches the viewport the uniforms were built for.
pub(crate) fn check_size(resolution: [f32; 2], actual: PhysicalSize) -> Result<(), RenderError> {
    let expected = PhysicalSize::new(resolution[0] as u32, resolution[1] as u32);
    if expected != actual {
        return Err(RenderError::SizeMismatch { expected, actual });
    }
    Ok(())
}
