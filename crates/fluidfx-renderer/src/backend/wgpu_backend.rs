use fluidfx_common::PhysicalSize;

use super::{check_size, RenderBackend};
use crate::composite::CompositePipeline;
use crate::gpu::pass;
use crate::gpu::{
    with_error_scope, CompositeUniforms, GpuContext, RenderError, SimulationUniforms,
    FLUID_FORMAT,
};
use crate::simulation::SimulationPipeline;
use crate::targets::{RenderTarget, TargetId};

/// A `Rgba16Float` fluid texture on the GPU.
pub struct GpuTarget {
    id: TargetId,
    size: PhysicalSize,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl GpuTarget {
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl RenderTarget for GpuTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn size(&self) -> PhysicalSize {
        self.size
    }
}

/// Backend running both passes as WGSL programs and presenting to the
/// window surface.
pub struct WgpuBackend {
    gpu: GpuContext,
    sampler: wgpu::Sampler,
    simulation: Option<SimulationPipeline>,
    composite: Option<CompositePipeline>,
    next_id: u64,
}

impl WgpuBackend {
    /// Check target format support and compile both programs.
    pub fn new(gpu: GpuContext) -> Result<Self, RenderError> {
        gpu.check_target_format(FLUID_FORMAT)?;
        let simulation = SimulationPipeline::new(&gpu.device)?;
        let composite = CompositePipeline::new(&gpu.device, gpu.format())?;
        let sampler = pass::create_fluid_sampler(&gpu.device);
        tracing::info!(
            "wgpu backend ready ({:?} targets, {:?} surface)",
            FLUID_FORMAT,
            gpu.format()
        );
        Ok(Self {
            gpu,
            sampler,
            simulation: Some(simulation),
            composite: Some(composite),
            next_id: 0,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    fn encoder(&self, label: &str) -> wgpu::CommandEncoder {
        self.gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }
}

fn released() -> RenderError {
    RenderError::DeviceError("wgpu backend already released".into())
}

impl RenderBackend for WgpuBackend {
    type Target = GpuTarget;

    fn create_target(&mut self, size: PhysicalSize) -> Result<GpuTarget, RenderError> {
        let device = &self.gpu.device;
        let (texture, error) = with_error_scope(device, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("fluid target"),
                size: wgpu::Extent3d {
                    width: size.width,
                    height: size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FLUID_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        });
        if let Some(e) = error {
            return Err(RenderError::TargetAllocation {
                size,
                message: e.to_string(),
            });
        }
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = TargetId(self.next_id);
        self.next_id += 1;
        Ok(GpuTarget {
            id,
            size,
            texture,
            view,
        })
    }

    fn release_target(&mut self, target: GpuTarget) {
        target.texture.destroy();
    }

    fn resize_surface(&mut self, size: PhysicalSize) -> Result<(), RenderError> {
        self.gpu.resize(size);
        Ok(())
    }

    fn simulate(
        &mut self,
        previous: &GpuTarget,
        current: &mut GpuTarget,
        uniforms: &SimulationUniforms,
    ) -> Result<(), RenderError> {
        let simulation = self.simulation.as_ref().ok_or_else(released)?;
        check_size(uniforms.resolution, previous.size())?;
        check_size(uniforms.resolution, current.size())?;

        let mut encoder = self.encoder("fluidfx simulation encoder");
        simulation.encode(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &self.sampler,
            previous.view(),
            current.view(),
            uniforms,
        );
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn composite(
        &mut self,
        fluid: &GpuTarget,
        uniforms: &CompositeUniforms,
    ) -> Result<(), RenderError> {
        let composite = self.composite.as_ref().ok_or_else(released)?;
        check_size(uniforms.resolution, fluid.size())?;

        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(e) => {
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    tracing::warn!("Surface {e}, reconfiguring");
                    self.gpu.resize(self.gpu.size);
                }
                return Err(e.into());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.encoder("fluidfx composite encoder");
        composite.encode(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &self.sampler,
            fluid.view(),
            &view,
            uniforms,
        );
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.simulation.take().is_some() {
            tracing::debug!("Released simulation program");
        }
        if self.composite.take().is_some() {
            tracing::debug!("Released composite program");
        }
    }
}
