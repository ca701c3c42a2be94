//! Reference backend evaluating the pass kernels on the CPU.
//!
//! Texels are stored row by row from the bottom row up, matching the
//! bottom-left pixel origin of the kernels.

use std::path::Path;

use fluidfx_common::PhysicalSize;
use glam::{Vec2, Vec4};

use super::{check_size, RenderBackend};
use crate::composite;
use crate::gpu::{CompositeUniforms, RenderError, SimulationUniforms};
use crate::simulation;
use crate::targets::{RenderTarget, TargetId};

/// An RGBA32F texture in host memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    id: TargetId,
    size: PhysicalSize,
    texels: Vec<[f32; 4]>,
}

impl CpuTexture {
    /// Zero-filled texture. Fails with `TargetAllocation` when the size is
    /// empty or the texels cannot be allocated.
    pub fn new(id: TargetId, size: PhysicalSize) -> Result<Self, RenderError> {
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::TargetAllocation {
                size,
                message: "zero-sized target".into(),
            });
        }
        Ok(Self {
            id,
            size,
            texels: zeroed_texels(size)?,
        })
    }

    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }

    pub fn texels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.texels
    }

    pub fn fill(&mut self, value: [f32; 4]) {
        self.texels.fill(value);
    }

    /// Texel at integer coordinates, bottom-left origin.
    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        self.texels[self.index(x, y)]
    }

    pub fn set_texel(&mut self, x: u32, y: u32, value: [f32; 4]) {
        let i = self.index(x, y);
        self.texels[i] = value;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Texel fetch with clamp-to-edge addressing.
    pub fn fetch(&self, x: i32, y: i32) -> Vec4 {
        let x = x.clamp(0, self.size.width as i32 - 1) as u32;
        let y = y.clamp(0, self.size.height as i32 - 1) as u32;
        Vec4::from_array(self.texel(x, y))
    }

    /// Bilinear sample at pixel-centre coordinate `p`, clamped to the edge.
    pub fn sample(&self, p: Vec2) -> Vec4 {
        let f = p - Vec2::splat(0.5);
        let base = f.floor();
        let t = f - base;
        let (x0, y0) = (base.x as i32, base.y as i32);
        let x1 = x0.saturating_add(1);
        let y1 = y0.saturating_add(1);
        let bottom = self.fetch(x0, y0).lerp(self.fetch(x1, y0), t.x);
        let top = self.fetch(x0, y1).lerp(self.fetch(x1, y1), t.x);
        bottom.lerp(top, t.y)
    }
}

impl RenderTarget for CpuTexture {
    fn id(&self) -> TargetId {
        self.id
    }

    fn size(&self) -> PhysicalSize {
        self.size
    }
}

fn zeroed_texels(size: PhysicalSize) -> Result<Vec<[f32; 4]>, RenderError> {
    let mut texels = Vec::new();
    texels
        .try_reserve_exact(size.texel_count())
        .map_err(|e| RenderError::TargetAllocation {
            size,
            message: e.to_string(),
        })?;
    texels.resize(size.texel_count(), [0.0; 4]);
    Ok(texels)
}

/// The presented surface of the CPU backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    size: PhysicalSize,
    pixels: Vec<[f32; 4]>,
}

impl Framebuffer {
    /// Black surface. Fails with `TargetAllocation` when the pixels cannot
    /// be allocated.
    pub fn new(size: PhysicalSize) -> Result<Self, RenderError> {
        Ok(Self {
            size,
            pixels: zeroed_texels(size)?,
        })
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.pixels
    }

    /// Pixel at integer coordinates, bottom-left origin.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[y as usize * self.size.width as usize + x as usize]
    }

    /// 8-bit RGBA bytes with the top row first, as image files expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let width = self.size.width as usize;
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for row in self.pixels.chunks(width.max(1)).rev() {
            for pixel in row {
                bytes.extend(pixel.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
            }
        }
        bytes
    }

    /// Write the framebuffer as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let image =
            image::RgbaImage::from_raw(self.size.width, self.size.height, self.to_rgba8())
                .ok_or_else(|| RenderError::Snapshot("framebuffer size mismatch".into()))?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::Snapshot(format!("{}: {e}", path.display())))?;
        tracing::info!("Wrote {}x{} frame to {}", self.size.width, self.size.height, path.display());
        Ok(())
    }
}

/// Backend that evaluates both passes in host memory.
#[derive(Debug)]
pub struct CpuBackend {
    framebuffer: Framebuffer,
    next_id: u64,
    live_targets: usize,
    released: bool,
}

impl CpuBackend {
    pub fn new(size: PhysicalSize) -> Result<Self, RenderError> {
        Ok(Self {
            framebuffer: Framebuffer::new(size.non_zero())?,
            next_id: 0,
            live_targets: 0,
            released: false,
        })
    }

    /// The most recently composited frame.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Number of allocated targets that have not been released.
    pub fn live_targets(&self) -> usize {
        self.live_targets
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn ensure_live(&self) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::DeviceError("cpu backend already released".into()));
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    type Target = CpuTexture;

    fn create_target(&mut self, size: PhysicalSize) -> Result<CpuTexture, RenderError> {
        self.ensure_live()?;
        let texture = CpuTexture::new(TargetId(self.next_id), size)?;
        self.next_id += 1;
        self.live_targets += 1;
        Ok(texture)
    }

    fn release_target(&mut self, target: CpuTexture) {
        self.live_targets = self.live_targets.saturating_sub(1);
        drop(target);
    }

    fn resize_surface(&mut self, size: PhysicalSize) -> Result<(), RenderError> {
        self.ensure_live()?;
        self.framebuffer = Framebuffer::new(size.non_zero())?;
        Ok(())
    }

    fn simulate(
        &mut self,
        previous: &CpuTexture,
        current: &mut CpuTexture,
        uniforms: &SimulationUniforms,
    ) -> Result<(), RenderError> {
        self.ensure_live()?;
        check_size(uniforms.resolution, previous.size())?;
        check_size(uniforms.resolution, current.size())?;
        simulation::run(previous, current, uniforms);
        Ok(())
    }

    fn composite(
        &mut self,
        fluid: &CpuTexture,
        uniforms: &CompositeUniforms,
    ) -> Result<(), RenderError> {
        self.ensure_live()?;
        check_size(uniforms.resolution, fluid.size())?;
        check_size(uniforms.resolution, self.framebuffer.size())?;
        composite::run(fluid, &mut self.framebuffer, uniforms);
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            tracing::debug!("Releasing cpu backend");
        }
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(width: u32, height: u32) -> CpuTexture {
        CpuTexture::new(TargetId(0), PhysicalSize::new(width, height)).unwrap()
    }

    #[test]
    fn zero_sized_target_is_an_allocation_error() {
        let err = CpuTexture::new(TargetId(0), PhysicalSize::new(0, 4)).unwrap_err();
        assert!(matches!(err, RenderError::TargetAllocation { .. }));
    }

    #[test]
    fn sample_at_texel_centre_returns_texel() {
        let mut tex = texture(4, 4);
        tex.set_texel(2, 1, [0.3, -0.2, 0.1, 0.0]);
        let v = tex.sample(Vec2::new(2.5, 1.5));
        assert_eq!(v, Vec4::new(0.3, -0.2, 0.1, 0.0));
    }

    #[test]
    fn sample_between_texels_interpolates() {
        let mut tex = texture(2, 1);
        tex.set_texel(0, 0, [0.0; 4]);
        tex.set_texel(1, 0, [1.0; 4]);
        let v = tex.sample(Vec2::new(1.0, 0.5));
        assert!((v.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_clamps_to_edge() {
        let mut tex = texture(3, 3);
        tex.fill([0.25; 4]);
        tex.set_texel(0, 0, [0.75; 4]);
        assert_eq!(tex.sample(Vec2::new(-40.0, -40.0)), Vec4::splat(0.75));
        assert_eq!(tex.sample(Vec2::new(1e9, 1e9)), Vec4::splat(0.25));
    }

    fn backend(width: u32, height: u32) -> CpuBackend {
        CpuBackend::new(PhysicalSize::new(width, height)).unwrap()
    }

    #[test]
    fn oversized_surface_is_an_allocation_error() {
        let huge = PhysicalSize::new(u32::MAX, u32::MAX);
        let err = CpuBackend::new(huge).unwrap_err();
        assert!(matches!(err, RenderError::TargetAllocation { size, .. } if size == huge));
    }

    #[test]
    fn failed_surface_resize_keeps_old_framebuffer() {
        let mut backend = backend(4, 4);
        let err = backend
            .resize_surface(PhysicalSize::new(u32::MAX, u32::MAX))
            .unwrap_err();
        assert!(matches!(err, RenderError::TargetAllocation { .. }));
        assert_eq!(backend.framebuffer().size(), PhysicalSize::new(4, 4));
    }

    #[test]
    fn backend_ids_are_unique_and_counted() {
        let mut backend = backend(4, 4);
        let a = backend.create_target(PhysicalSize::new(4, 4)).unwrap();
        let b = backend.create_target(PhysicalSize::new(4, 4)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(backend.live_targets(), 2);
        backend.release_target(a);
        backend.release_target(b);
        assert_eq!(backend.live_targets(), 0);
    }

    #[test]
    fn release_is_idempotent_and_blocks_allocation() {
        let mut backend = backend(4, 4);
        backend.release();
        backend.release();
        assert!(backend.is_released());
        assert!(backend.create_target(PhysicalSize::new(4, 4)).is_err());
    }

    #[test]
    fn simulate_rejects_mismatched_uniforms() {
        let mut backend = backend(4, 4);
        let prev = backend.create_target(PhysicalSize::new(4, 4)).unwrap();
        let mut cur = backend.create_target(PhysicalSize::new(4, 4)).unwrap();
        let mut uniforms = SimulationUniforms::from_config(&Default::default());
        uniforms.update_viewport(PhysicalSize::new(8, 8));
        let err = backend.simulate(&prev, &mut cur, &uniforms).unwrap_err();
        assert!(matches!(err, RenderError::SizeMismatch { .. }));
    }

    #[test]
    fn framebuffer_rgba8_is_top_row_first() {
        let mut fb = Framebuffer::new(PhysicalSize::new(1, 2)).unwrap();
        fb.pixels_mut()[0] = [1.0, 0.0, 0.0, 1.0];
        fb.pixels_mut()[1] = [0.0, 0.0, 1.0, 1.0];
        assert_eq!(fb.to_rgba8(), vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn framebuffer_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let fb = Framebuffer::new(PhysicalSize::new(3, 2)).unwrap();
        fb.save_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
