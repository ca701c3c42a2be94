use crate::gpu::pass;
use crate::gpu::{CompositeUniforms, RenderError};

/// GPU program of the composite pass, writing the surface format.
pub struct CompositePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
}

impl CompositePipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, RenderError> {
        let shader = pass::compile_shader(
            device,
            "composite",
            include_str!("../shaders/composite.wgsl"),
        )?;
        let uniform_size = std::mem::size_of::<CompositeUniforms>();
        let bind_group_layout =
            pass::create_bind_group_layout(device, "composite bind group layout", uniform_size);
        let pipeline =
            pass::create_fullscreen_pipeline(device, "composite", &shader, &bind_group_layout, format)?;
        let uniform_buffer = pass::create_uniform_buffer(device, "composite uniforms", uniform_size);

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
        })
    }

    /// Record the pass reading `fluid` and writing the surface view.
    #[allow(clippy::too_many_arguments)]
    pub fn encode(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        sampler: &wgpu::Sampler,
        fluid: &wgpu::TextureView,
        surface: &wgpu::TextureView,
        uniforms: &CompositeUniforms,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let bind_group = pass::create_bind_group(
            device,
            "composite bind group",
            &self.bind_group_layout,
            &self.uniform_buffer,
            fluid,
            sampler,
        );
        pass::draw_fullscreen(encoder, "composite pass", &self.pipeline, &bind_group, surface);
    }
}
