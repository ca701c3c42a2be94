use fluidfx_common::PhysicalSize;

use super::{RenderTarget, Slot};
use crate::backend::RenderBackend;
use crate::gpu::RenderError;

/// Two equally sized targets with "current" and "previous" roles.
///
/// `swap` only relabels the slots; texel data never moves between targets.
#[derive(Debug)]
pub struct RenderTargetPair<T> {
    targets: [T; 2],
    current: Slot,
}

impl<T: RenderTarget> RenderTargetPair<T> {
    /// Allocate both targets at `size`.
    ///
    /// If the second allocation fails the first is released before the
    /// error is returned.
    pub fn allocate<B>(backend: &mut B, size: PhysicalSize) -> Result<Self, RenderError>
    where
        B: RenderBackend<Target = T>,
    {
        let first = backend.create_target(size)?;
        let second = match backend.create_target(size) {
            Ok(target) => target,
            Err(e) => {
                backend.release_target(first);
                return Err(e);
            }
        };
        tracing::debug!(
            "Allocated render targets {} and {} at {}x{}",
            first.id(),
            second.id(),
            size.width,
            size.height
        );
        Ok(Self {
            targets: [first, second],
            current: Slot::A,
        })
    }

    /// Reallocate both targets at `size`, discarding their contents.
    ///
    /// The new pair is allocated before the old one is released, so on error
    /// the existing targets stay valid and untouched.
    pub fn resize<B>(&mut self, backend: &mut B, size: PhysicalSize) -> Result<(), RenderError>
    where
        B: RenderBackend<Target = T>,
    {
        let fresh = Self::allocate(backend, size)?;
        let stale = std::mem::replace(self, fresh);
        stale.dispose(backend);
        Ok(())
    }

    /// Exchange the current and previous roles.
    pub fn swap(&mut self) {
        self.current = self.current.other();
    }

    /// Most recently written target.
    pub fn current(&self) -> &T {
        &self.targets[self.current.index()]
    }

    /// Read source of the next simulation pass.
    pub fn previous(&self) -> &T {
        &self.targets[self.current.other().index()]
    }

    /// Borrow `(previous, current)` for a simulation pass.
    pub fn split_mut(&mut self) -> (&T, &mut T) {
        let (a, b) = self.targets.split_at_mut(1);
        match self.current {
            Slot::A => (&b[0], &mut a[0]),
            Slot::B => (&a[0], &mut b[0]),
        }
    }

    pub fn current_slot(&self) -> Slot {
        self.current
    }

    pub fn size(&self) -> PhysicalSize {
        self.targets[0].size()
    }

    /// Release both targets.
    pub fn dispose<B>(self, backend: &mut B)
    where
        B: RenderBackend<Target = T>,
    {
        let [a, b] = self.targets;
        tracing::debug!("Releasing render targets {} and {}", a.id(), b.id());
        backend.release_target(a);
        backend.release_target(b);
    }
}
