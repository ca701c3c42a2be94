//! Ping-pong pair of fluid render targets.

mod pair;
mod types;

pub use pair::*;
pub use types::*;
