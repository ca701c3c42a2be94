use fluidfx_common::PhysicalSize;

/// Identity marker of an allocated render target.
///
/// Ids are never reused by a backend, so they tell targets apart even after
/// the pair has swapped roles or been reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// A floating-point RGBA surface the simulation can read and write.
pub trait RenderTarget {
    fn id(&self) -> TargetId;
    fn size(&self) -> PhysicalSize;
}

/// Which slot of the pair holds the most recently written target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}
