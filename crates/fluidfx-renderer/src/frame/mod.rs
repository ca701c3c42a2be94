//! Frame driver: sequences the passes once per animation tick.
//!
//! Per frame, in order: bridge uniforms, simulate previous into current,
//! composite current, swap roles, advance the counter. A frame that fails
//! in either pass is dropped with neither the swap nor the advance.

mod types;

pub use types::*;

#[cfg(test)]
mod tests;

use fluidfx_common::PhysicalSize;

use crate::backend::RenderBackend;
use crate::gpu::{bridge_uniforms, RenderError};
use crate::targets::RenderTargetPair;

pub struct FrameDriver<B: RenderBackend> {
    backend: B,
    targets: Option<RenderTargetPair<B::Target>>,
    size: PhysicalSize,
    frame: u64,
    running: bool,
}

impl<B: RenderBackend> FrameDriver<B> {
    /// Size the presented surface and allocate the target pair.
    ///
    /// On failure the backend is released before the error is returned.
    pub fn new(mut backend: B, size: PhysicalSize) -> Result<Self, RenderError> {
        let size = size.non_zero();
        let targets = backend
            .resize_surface(size)
            .and_then(|()| RenderTargetPair::allocate(&mut backend, size));
        let targets = match targets {
            Ok(targets) => targets,
            Err(e) => {
                backend.release();
                return Err(e);
            }
        };
        tracing::info!("Frame driver started at {}x{}", size.width, size.height);
        Ok(Self {
            backend,
            targets: Some(targets),
            size,
            frame: 0,
            running: true,
        })
    }

    /// Render one frame from `inputs`.
    ///
    /// Returns [`FrameOutcome::Stopped`] without touching any resource once
    /// the driver has been stopped.
    pub fn render_frame(&mut self, inputs: &FrameInputs) -> Result<FrameOutcome, RenderError> {
        if !self.running {
            return Ok(FrameOutcome::Stopped);
        }
        let Some(targets) = self.targets.as_mut() else {
            return Ok(FrameOutcome::Stopped);
        };

        let (simulation, composite) = bridge_uniforms(inputs, self.frame, self.size);

        {
            let (previous, current) = targets.split_mut();
            self.backend.simulate(previous, current, &simulation)?;
        }
        self.backend.composite(targets.current(), &composite)?;

        targets.swap();
        let frame = self.frame;
        self.frame += 1;
        Ok(FrameOutcome::Presented { frame })
    }

    /// Reallocate both targets and the surface, then restart from a cold
    /// start. A no-op once stopped.
    ///
    /// If the new targets cannot be allocated the old ones stay in place.
    pub fn resize(&mut self, size: PhysicalSize) -> Result<(), RenderError> {
        if !self.running {
            return Ok(());
        }
        let Some(targets) = self.targets.as_mut() else {
            return Ok(());
        };
        let size = size.non_zero();

        targets.resize(&mut self.backend, size)?;
        self.size = size;
        self.frame = 0;
        tracing::debug!("Resized to {}x{}, frame counter reset", size.width, size.height);
        self.backend.resize_surface(size)
    }

    /// Stop the loop and release the targets and pass programs.
    ///
    /// Safe to call repeatedly; later frames and resizes are no-ops.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("Frame driver stopping after {} frames", self.frame);
        }
        self.running = false;
        if let Some(targets) = self.targets.take() {
            targets.dispose(&mut self.backend);
        }
        self.backend.release();
    }

    /// Frames rendered since start or the last resize.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn targets(&self) -> Option<&RenderTargetPair<B::Target>> {
        self.targets.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: RenderBackend> Drop for FrameDriver<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
