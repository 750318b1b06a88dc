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

pub const SHADER: &str = "shaders/pbr.wgsl";

/// Cook-Torrance with albedo, normal, metallic, roughness and ambient-occlusion maps.
pub fn mk_pbr_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    color_format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("PBR Pipeline Layout"),
        bind_group_layouts: &[&layouts.scene, &layouts.model, &layouts.pbr_textures],
        push_constant_ranges: &[],
    });
    mk_render_pipeline(
        device,
        "PBR Pipeline",
        &layout,
        color_format,
        Some(REPLACE),
        Some(Texture::DEPTH_FORMAT),
        &[ModelVertex::desc()],
        shader,
    )
}
