pub mod errors;
pub mod types;

pub use errors::{ConfigError, FluidFxError};
pub use types::{Color, PhysicalSize};

pub type Result<T> = std::result::Result<T, FluidFxError>;
