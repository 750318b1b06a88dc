use std::path::Path;

use crate::resources::load_string;

/// Run `create` inside a validation error scope. Errors are logged under
/// `label` and turn into `None`.
pub async fn validated<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> Option<T> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match device.pop_error_scope().await {
        None => Some(value),
        Some(e) => {
            log::error!("{label}: {e}");
            None
        }
    }
}

/// Read a WGSL file from the asset directory and compile it.
pub async fn load_shader(device: &wgpu::Device, root: &Path, file_name: &str) -> Option<wgpu::ShaderModule> {
    let source = match load_string(root, file_name).await {
        Ok(source) => source,
        Err(e) => {
            log::error!("Error loading shader {file_name}: {e:#}");
            return None;
        }
    };
    compile_shader(device, file_name, &source).await
}

pub async fn compile_shader(device: &wgpu::Device, label: &str, source: &str) -> Option<wgpu::ShaderModule> {
    validated(device, label, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
    .await
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // The floor is visible from both sides.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

pub const REPLACE: wgpu::BlendState = wgpu::BlendState {
    alpha: wgpu::BlendComponent::REPLACE,
    color: wgpu::BlendComponent::REPLACE,
};
