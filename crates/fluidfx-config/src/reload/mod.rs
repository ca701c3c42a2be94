//! Live config reload manager.
//!
//! Combines the file watcher with config loading so the renderer picks up
//! edits to the config file without restarting.

mod manager;


pub use manager::ReloadManager;
