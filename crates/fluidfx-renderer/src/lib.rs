//! Double-buffered fluid simulation and composite renderer.
//!
//! Every frame the [`FrameDriver`] bridges the effect config into shader
//! uniforms, runs the simulation pass from the previous fluid buffer into
//! the current one, composites the current buffer onto the presented
//! surface, then swaps the buffer roles.

pub mod backend;
pub mod composite;
pub mod frame;
pub mod gpu;
pub mod perf;
pub mod pointer;
pub mod simulation;
pub mod targets;

pub use backend::{CpuBackend, CpuTexture, Framebuffer, GpuTarget, RenderBackend, WgpuBackend};
pub use frame::{FrameDriver, FrameInputs, FrameOutcome};
pub use gpu::{CompositeUniforms, GpuContext, RenderError, SimulationUniforms};
pub use perf::FrameTimer;
pub use pointer::{PointerForcing, PointerState};
pub use targets::{RenderTarget, RenderTargetPair, TargetId};

pub use fluidfx_common::PhysicalSize;
