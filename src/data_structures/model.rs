//! Meshes, vertex formats and textured models.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::{
    context::Gpu,
    data_structures::{material::Material, primitives::Primitive, texture::Texture},
    pipelines::uniform::{ModelRaw, Uniform},
    resources::mesh::build_mesh,
};

/// Layout of a vertex type inside a vertex buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x2,
            2 => Float32x3,
            3 => Float32x3,
            4 => Float32x3,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Position-only vertex of a lamp.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LampVertex {
    pub position: [f32; 3],
}

impl Vertex for LampVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LampVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new<V: bytemuck::Pod>(device: &wgpu::Device, name: &str, vertices: &[V], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
        }
    }

    pub fn dispose(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

pub trait DrawMesh {
    fn draw_mesh(&mut self, mesh: &Mesh);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }
}

/// Which lighting program a model is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    #[default]
    Phong,
    Pbr,
}

/// The maps a model samples, chosen by how many textures it was built with.
#[derive(Clone, Copy, Debug)]
pub enum TextureSet<'a> {
    None,
    Diffuse(Option<&'a Texture>),
    DiffuseSpecular {
        diffuse: Option<&'a Texture>,
        specular: Option<&'a Texture>,
    },
    Pbr {
        albedo: Option<&'a Texture>,
        normal: Option<&'a Texture>,
        metallic: Option<&'a Texture>,
        roughness: Option<&'a Texture>,
        ao: Option<&'a Texture>,
    },
}

impl<'a> TextureSet<'a> {
    /// One texture is a diffuse map, two are diffuse and specular, five are the
    /// PBR maps; any other count means an untextured model.
    pub fn from_slice(textures: &[Option<&'a Texture>]) -> Self {
        match *textures {
            [diffuse] => TextureSet::Diffuse(diffuse),
            [diffuse, specular] => TextureSet::DiffuseSpecular { diffuse, specular },
            [albedo, normal, metallic, roughness, ao] => TextureSet::Pbr {
                albedo,
                normal,
                metallic,
                roughness,
                ao,
            },
            _ => TextureSet::None,
        }
    }

    /// The program this set is sampled by.
    pub fn shading(&self) -> Shading {
        match self {
            TextureSet::Pbr { .. } => Shading::Pbr,
            _ => Shading::Phong,
        }
    }

    fn bind_group(&self, gpu: &Gpu, name: &str) -> wgpu::BindGroup {
        let fallback = gpu.fallbacks;
        let white = &fallback.white;
        match *self {
            TextureSet::None => phong_bind_group(gpu, name, white, white),
            TextureSet::Diffuse(diffuse) => phong_bind_group(gpu, name, diffuse.unwrap_or(white), white),
            TextureSet::DiffuseSpecular { diffuse, specular } => {
                phong_bind_group(gpu, name, diffuse.unwrap_or(white), specular.unwrap_or(white))
            }
            TextureSet::Pbr {
                albedo,
                normal,
                metallic,
                roughness,
                ao,
            } => {
                let views = [
                    albedo.unwrap_or(white),
                    normal.unwrap_or(&fallback.normal),
                    metallic.unwrap_or(&fallback.black),
                    roughness.unwrap_or(white),
                    ao.unwrap_or(white),
                ];
                pbr_bind_group(gpu, name, views)
            }
        }
    }
}

fn phong_bind_group(gpu: &Gpu, name: &str, diffuse: &Texture, specular: &Texture) -> wgpu::BindGroup {
    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &gpu.layouts.phong_textures,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&diffuse.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&gpu.fallbacks.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&specular.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&gpu.fallbacks.sampler),
            },
        ],
        label: Some(&format!("{name} phong textures")),
    })
}

fn pbr_bind_group(gpu: &Gpu, name: &str, maps: [&Texture; 5]) -> wgpu::BindGroup {
    let [albedo, normal, metallic, roughness, ao] = maps;
    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &gpu.layouts.pbr_textures,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&albedo.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&normal.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&metallic.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(&roughness.view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::TextureView(&ao.view),
            },
            wgpu::BindGroupEntry {
                binding: 5,
                resource: wgpu::BindingResource::Sampler(&gpu.fallbacks.sampler),
            },
        ],
        label: Some(&format!("{name} pbr textures")),
    })
}

/// A mesh placed in the world with a material and its texture maps.
#[derive(Debug)]
pub struct Model {
    name: String,
    mesh: Option<Mesh>,
    model_matrix: Matrix4<f32>,
    material: Material,
    shading: Shading,
    uniform: Uniform<ModelRaw>,
    textures: wgpu::BindGroup,
}

impl Model {
    pub fn new(
        gpu: &Gpu,
        name: &str,
        mesh: Option<Mesh>,
        model_matrix: Matrix4<f32>,
        material: Material,
        textures: TextureSet<'_>,
    ) -> Self {
        let uniform = Uniform::new(
            gpu.device,
            &gpu.layouts.model,
            &format!("{name} model uniform"),
            &ModelRaw::new(&model_matrix, &material),
        );
        Self {
            name: name.to_string(),
            mesh,
            model_matrix,
            material,
            shading: textures.shading(),
            uniform,
            textures: textures.bind_group(gpu, name),
        }
    }

    /// Build a model from a primitive shape, picking the texture set from the
    /// number of textures given.
    pub fn make_part(
        gpu: &Gpu,
        name: &str,
        material: Material,
        model_matrix: Matrix4<f32>,
        textures: &[Option<&Texture>],
        primitive: Primitive,
    ) -> Self {
        let mesh = build_mesh(gpu.device, name, &primitive.geometry());
        Self::new(
            gpu,
            name,
            Some(mesh),
            model_matrix,
            material,
            TextureSet::from_slice(textures),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model_matrix
    }

    pub fn set_model_matrix(&mut self, model_matrix: Matrix4<f32>) {
        self.model_matrix = model_matrix;
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Upload the current matrix and material, then draw.
    ///
    /// Expects the pipeline for [`Self::shading`] and the scene block at group 0
    /// to be bound already.
    pub fn render(&self, queue: &wgpu::Queue, render_pass: &mut wgpu::RenderPass<'_>) {
        let Some(mesh) = &self.mesh else {
            log::error!("null in model render ({})", self.name);
            return;
        };
        self.uniform
            .write(queue, &ModelRaw::new(&self.model_matrix, &self.material));
        render_pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        render_pass.set_bind_group(2, &self.textures, &[]);
        render_pass.draw_mesh(mesh);
    }

    pub fn dispose(&self) {
        if let Some(mesh) = &self.mesh {
            mesh.dispose();
        }
        self.uniform.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_count_selects_the_set() {
        assert!(matches!(TextureSet::from_slice(&[]), TextureSet::None));
        assert!(matches!(TextureSet::from_slice(&[None]), TextureSet::Diffuse(None)));
        assert!(matches!(
            TextureSet::from_slice(&[None, None]),
            TextureSet::DiffuseSpecular { .. }
        ));
        assert!(matches!(TextureSet::from_slice(&[None; 3]), TextureSet::None));
        assert!(matches!(TextureSet::from_slice(&[None; 5]), TextureSet::Pbr { .. }));
        assert!(matches!(TextureSet::from_slice(&[None; 7]), TextureSet::None));
    }

    #[test]
    fn only_pbr_maps_select_the_pbr_program() {
        assert_eq!(TextureSet::from_slice(&[None; 5]).shading(), Shading::Pbr);
        assert_eq!(TextureSet::from_slice(&[None, None]).shading(), Shading::Phong);
        assert_eq!(TextureSet::None.shading(), Shading::Phong);
    }

    #[test]
    fn model_vertex_layout_covers_the_struct() {
        let desc = ModelVertex::desc();
        assert_eq!(desc.array_stride, 56);
        assert_eq!(desc.attributes.len(), 5);
        assert_eq!(desc.attributes[4].offset, 44);
        assert_eq!(LampVertex::desc().array_stride, 12);
    }
}
