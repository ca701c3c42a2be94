use serde::{Deserialize, Serialize};

/// Physical pixel dimensions of a surface or render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same size with both dimensions raised to at least one pixel.
    pub fn non_zero(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_clamps_each_axis() {
        assert_eq!(PhysicalSize::new(0, 0).non_zero(), PhysicalSize::new(1, 1));
        assert_eq!(PhysicalSize::new(640, 0).non_zero(), PhysicalSize::new(640, 1));
    }

    #[test]
    fn texel_count_is_area() {
        assert_eq!(PhysicalSize::new(200, 100).texel_count(), 20_000);
        assert_eq!(PhysicalSize::new(0, 100).texel_count(), 0);
    }
}
