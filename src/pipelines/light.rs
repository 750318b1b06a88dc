//! Lamps: the small unlit shapes drawn where each light sits.

use cgmath::Matrix4;

use crate::{
    context::Gpu,
    data_structures::{
        light::{LampShape, Light},
        model::{DrawMesh, LampVertex, Mesh, Vertex},
        primitives::{lamp_cube, lamp_sphere},
        texture,
    },
    pipelines::{
        Layouts,
        basic::{REPLACE, mk_render_pipeline},
        uniform::{LampRaw, Uniform},
    },
    resources::mesh::build_lamp_mesh,
};

pub const SHADER: &str = "shaders/light.wgsl";

pub fn mk_lamp_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    color_format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Lamp Pipeline Layout"),
        bind_group_layouts: &[&layouts.lamp],
        push_constant_ranges: &[],
    });
    mk_render_pipeline(
        device,
        "Lamp Pipeline",
        &layout,
        color_format,
        Some(REPLACE),
        Some(texture::Texture::DEPTH_FORMAT),
        &[LampVertex::desc()],
        shader,
    )
}

/// GPU side of one light.
#[derive(Debug)]
pub struct Lamp {
    mesh: Mesh,
    uniform: Uniform<LampRaw>,
}

impl Lamp {
    pub fn new(gpu: &Gpu, shape: LampShape) -> Self {
        let (name, geometry) = match shape {
            LampShape::Cube => ("lamp cube", lamp_cube()),
            LampShape::Sphere => ("lamp sphere", lamp_sphere()),
        };
        let mesh = build_lamp_mesh(gpu.device, name, &geometry);
        let uniform = Uniform::new(
            gpu.device,
            &gpu.layouts.lamp,
            &format!("{name} uniform"),
            &LampRaw::new(Matrix4::from_scale(0.0)),
        );
        Self { mesh, uniform }
    }

    /// Upload `view_proj · model(light)` for the next draw.
    pub fn update(&self, queue: &wgpu::Queue, light: &Light, view_proj: Matrix4<f32>) {
        self.uniform
            .write(queue, &LampRaw::new(view_proj * light.lamp_model_matrix()));
    }

    /// Expects the lamp pipeline to be bound.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.uniform.bind_group, &[]);
        render_pass.draw_mesh(&self.mesh);
    }

    pub fn dispose(&self) {
        self.mesh.dispose();
        self.uniform.dispose();
    }
}
