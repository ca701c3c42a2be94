//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the frame driver, pointer tracking and the
//! live-reloaded config.

mod core;
mod event_handler;
mod init;
mod render;
mod shutdown;

pub use core::FluidFxApp;
