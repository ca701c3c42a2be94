mod color;
mod size;

pub use color::Color;
pub use size::PhysicalSize;
