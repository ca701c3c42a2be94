use crate::gpu::pass;
use crate::gpu::{RenderError, SimulationUniforms, FLUID_FORMAT};

/// GPU program of the simulation pass.
pub struct SimulationPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
}

impl SimulationPipeline {
    pub fn new(device: &wgpu::Device) -> Result<Self, RenderError> {
        let shader = pass::compile_shader(
            device,
            "simulation",
            include_str!("../shaders/simulation.wgsl"),
        )?;
        let uniform_size = std::mem::size_of::<SimulationUniforms>();
        let bind_group_layout =
            pass::create_bind_group_layout(device, "simulation bind group layout", uniform_size);
        let pipeline = pass::create_fullscreen_pipeline(
            device,
            "simulation",
            &shader,
            &bind_group_layout,
            FLUID_FORMAT,
        )?;
        let uniform_buffer =
            pass::create_uniform_buffer(device, "simulation uniforms", uniform_size);

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
        })
    }

    /// Record the pass reading `previous` and writing `target`.
    #[allow(clippy::too_many_arguments)]
    pub fn encode(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        sampler: &wgpu::Sampler,
        previous: &wgpu::TextureView,
        target: &wgpu::TextureView,
        uniforms: &SimulationUniforms,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let bind_group = pass::create_bind_group(
            device,
            "simulation bind group",
            &self.bind_group_layout,
            &self.uniform_buffer,
            previous,
            sampler,
        );
        pass::draw_fullscreen(encoder, "simulation pass", &self.pipeline, &bind_group, target);
    }
}
