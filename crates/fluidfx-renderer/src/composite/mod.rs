//! Composite pass: turns the fluid field into the presented image.
//!
//! A procedural color field is warped by the fluid velocity and shaded with
//! the four-color palette. The pass keeps no state between frames.

pub mod kernel;
mod pipeline;

pub use kernel::run;
pub use pipeline::CompositePipeline;
