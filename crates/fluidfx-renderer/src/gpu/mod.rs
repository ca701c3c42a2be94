mod context;
pub(crate) mod pass;
mod scope;
mod types;
mod uniforms;

pub use context::*;
pub(crate) use scope::*;
pub use types::*;
pub use uniforms::*;
