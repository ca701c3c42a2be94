//! Pointer tracking and the forcing term it feeds into the simulation.
//!
//! Positions are kept in surface pixels with a bottom-left origin, which is
//! the convention of the simulation kernel. Window systems report top-left
//! coordinates, so `on_move` flips the y axis.

use std::time::{Duration, Instant};

/// Forcing term consumed by the simulation for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerForcing {
    pub position: [f32; 2],
    pub previous: [f32; 2],
    /// Positive while forcing; zero for the neutral term.
    pub active: f32,
}

impl PointerForcing {
    /// Zero-magnitude forcing.
    pub const NEUTRAL: Self = Self {
        position: [0.0; 2],
        previous: [0.0; 2],
        active: 0.0,
    };

    pub fn is_active(&self) -> bool {
        self.active > 0.0
    }

    /// Movement since the previous sample, in pixels.
    pub fn displacement(&self) -> [f32; 2] {
        [
            self.position[0] - self.previous[0],
            self.position[1] - self.previous[1],
        ]
    }

    /// `[x, y, prev_x, prev_y]` as packed into the simulation uniforms.
    pub fn to_uniform(&self) -> [f32; 4] {
        [
            self.position[0],
            self.position[1],
            self.previous[0],
            self.previous[1],
        ]
    }
}

/// Most recent pointer samples over the surface.
///
/// Written by input events and read once per frame. Displacement is
/// measured from the position at the end of the previous frame, so a pointer
/// that rests over the surface reports zero movement and the simulation
/// applies stop decay until the idle timeout clears the forcing.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<[f32; 2]>,
    previous: [f32; 2],
    last_move: Option<Instant>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move reported in top-left-origin pixels.
    pub fn on_move(&mut self, x: f32, y_top_left: f32, surface_height: f32, now: Instant) {
        let sample = [x, surface_height - y_top_left];
        if self.position.is_none() {
            self.previous = sample;
        }
        self.position = Some(sample);
        self.last_move = Some(now);
    }

    /// The pointer left the surface; forcing is neutral until it moves again.
    pub fn on_leave(&mut self) {
        *self = Self::default();
    }

    /// Forcing term for a frame rendered at `now`.
    ///
    /// Neutral when the pointer is outside the surface or has not moved for
    /// `idle_timeout`, even if the last known position is non-zero.
    pub fn forcing(&self, now: Instant, idle_timeout: Duration) -> PointerForcing {
        let (Some(position), Some(last_move)) = (self.position, self.last_move) else {
            return PointerForcing::NEUTRAL;
        };
        if now.saturating_duration_since(last_move) >= idle_timeout {
            return PointerForcing::NEUTRAL;
        }
        PointerForcing {
            position,
            previous: self.previous,
            active: 1.0,
        }
    }

    /// Close the frame: the next frame measures movement from here.
    pub fn end_frame(&mut self) {
        if let Some(position) = self.position {
            self.previous = position;
        }
    }

    /// Last known position, bottom-left origin.
    pub fn position(&self) -> Option<[f32; 2]> {
        self.position
    }
}
