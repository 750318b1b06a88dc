use crate::{
    data_structures::{
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    pipelines::{
        Layouts,
        basic::{REPLACE, mk_render_pipeline},
    },
};

pub const SHADER: &str = "shaders/phong.wgsl";

/// Phong lighting over every light, with diffuse and specular maps.
pub fn mk_phong_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    color_format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Phong Pipeline Layout"),
        bind_group_layouts: &[&layouts.scene, &layouts.model, &layouts.phong_textures],
        push_constant_ranges: &[],
    });
    mk_render_pipeline(
        device,
        "Phong Pipeline",
        &layout,
        color_format,
        Some(REPLACE),
        Some(Texture::DEPTH_FORMAT),
        &[ModelVertex::desc()],
        shader,
    )
}
