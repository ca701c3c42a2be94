//! Simulation pass: advances the fluid field by one frame.
//!
//! Each texel holds `(velocity.x, velocity.y, trail, aux)`. The pass reads
//! the previous field and writes the next one; [`kernel`] is the reference
//! evaluation and `simulation.wgsl` mirrors it on the GPU.

pub mod kernel;
mod pipeline;

pub use kernel::run;
pub use pipeline::SimulationPipeline;
