//! Typed uniform blocks shared between Rust and the WGSL programs.
//!
//! Each `*Raw` struct mirrors a WGSL struct byte for byte; the padding fields
//! keep every `vec3` on a 16-byte boundary.

use std::marker::PhantomData;

use cgmath::{Matrix4, Point3, Rad};
use wgpu::util::DeviceExt;

use crate::data_structures::{
    light::{
        ATTENUATION_CONSTANT, ATTENUATION_LINEAR, ATTENUATION_QUADRATIC, Light, LightKind,
        SPOT_CUT_OFF, SPOT_OUTER_CUT_OFF,
    },
    material::Material,
    transform::normal_matrix,
};

/// Upper bound of lights the programs loop over.
pub const MAX_LIGHTS: usize = 4;

/// A uniform buffer holding one `T` and the bind group exposing it at binding 0.
#[derive(Debug)]
pub struct Uniform<T> {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> Uniform<T> {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str, value: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self {
            buffer,
            bind_group,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn dispose(&self) {
        self.buffer.destroy();
    }
}

pub fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    pub position: [f32; 3],
    pub kind: u32,
    pub direction: [f32; 3],
    pub cut_off: f32,
    pub ambient: [f32; 3],
    pub outer_cut_off: f32,
    pub diffuse: [f32; 3],
    pub constant: f32,
    pub specular: [f32; 3],
    pub linear: f32,
    pub quadratic: f32,
    pub _padding: [f32; 3],
}

impl From<&Light> for LightRaw {
    fn from(light: &Light) -> Self {
        let material = light.material();
        Self {
            position: light.position().into(),
            kind: match light.kind() {
                LightKind::Point => 0,
                LightKind::Spot => 1,
            },
            direction: light.direction().into(),
            cut_off: Rad::from(SPOT_CUT_OFF).0.cos(),
            ambient: material.ambient.into(),
            outer_cut_off: Rad::from(SPOT_OUTER_CUT_OFF).0.cos(),
            diffuse: material.diffuse.into(),
            constant: ATTENUATION_CONSTANT,
            specular: material.specular.into(),
            linear: ATTENUATION_LINEAR,
            quadratic: ATTENUATION_QUADRATIC,
            _padding: [0.0; 3],
        }
    }
}

/// Per-frame data: camera and every light.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneRaw {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub num_lights: u32,
    pub lights: [LightRaw; MAX_LIGHTS],
}

impl SceneRaw {
    /// Lights beyond [`MAX_LIGHTS`] are dropped with a warning.
    pub fn new(view_proj: Matrix4<f32>, view_pos: Point3<f32>, lights: &[Light]) -> Self {
        if lights.len() > MAX_LIGHTS {
            log::warn!("{} lights supplied, only the first {MAX_LIGHTS} are shaded", lights.len());
        }
        let mut raw = [LightRaw::default(); MAX_LIGHTS];
        for (slot, light) in raw.iter_mut().zip(lights) {
            *slot = light.into();
        }
        Self {
            view_proj: view_proj.into(),
            view_pos: view_pos.into(),
            num_lights: lights.len().min(MAX_LIGHTS) as u32,
            lights: raw,
        }
    }
}

/// Per-model data: placement and surface material.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub ambient: [f32; 3],
    pub shininess: f32,
    pub diffuse: [f32; 3],
    pub _padding: f32,
    pub specular: [f32; 3],
    pub _padding2: f32,
}

impl ModelRaw {
    pub fn new(model: &Matrix4<f32>, material: &Material) -> Self {
        Self {
            model: (*model).into(),
            normal: normal_matrix(model).into(),
            ambient: material.ambient.into(),
            shininess: material.shininess,
            diffuse: material.diffuse.into(),
            _padding: 0.0,
            specular: material.specular.into(),
            _padding2: 0.0,
        }
    }
}

/// Lamp data: the full model-view-projection and a flat colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LampRaw {
    pub mvp: [[f32; 4]; 4],
    pub colour: [f32; 4],
}

impl LampRaw {
    pub fn new(mvp: Matrix4<f32>) -> Self {
        Self {
            mvp: mvp.into(),
            colour: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::light::{LampShape, LightPosition, LightRig};
    use cgmath::SquareMatrix;
    use std::mem::size_of;

    #[test]
    fn layouts_match_the_wgsl_structs() {
        assert_eq!(size_of::<LightRaw>(), 96);
        assert_eq!(size_of::<SceneRaw>(), 80 + 96 * MAX_LIGHTS);
        assert_eq!(size_of::<ModelRaw>(), 176);
        assert_eq!(size_of::<LampRaw>(), 80);
    }

    #[test]
    fn scene_block_carries_the_rig() {
        let mut rig = LightRig::new();
        rig.change_global_light_position(LightPosition::Right);
        let raw = SceneRaw::new(Matrix4::identity(), Point3::new(0.0, 7.5, 0.01), rig.lights());
        assert_eq!(raw.num_lights, 2);
        assert_eq!(raw.view_pos, [0.0, 7.5, 0.01]);
        assert_eq!(raw.lights[0].position, [3.0, 1.0, 0.0]);
        assert_eq!(raw.lights[0].kind, 0);
        assert_eq!(raw.lights[1].kind, 1);
        assert_eq!(raw.lights[1].direction, [0.0, -4.0, 0.0]);
        assert!((raw.lights[1].cut_off - 12.5f32.to_radians().cos()).abs() < 1e-6);
        assert!((raw.lights[1].outer_cut_off - 17.5f32.to_radians().cos()).abs() < 1e-6);
        assert_eq!(raw.lights[1].linear, 0.09);
        assert_eq!(raw.lights[1].quadratic, 0.032);
        assert_eq!(raw.lights[2], LightRaw::default());
    }

    #[test]
    fn surplus_lights_are_dropped() {
        let lights: Vec<_> = (0..6).map(|_| Light::new(LampShape::Cube)).collect();
        let raw = SceneRaw::new(Matrix4::identity(), Point3::new(0.0, 0.0, 0.0), &lights);
        assert_eq!(raw.num_lights, MAX_LIGHTS as u32);
    }

    #[test]
    fn model_block_carries_material() {
        let material = Material::default();
        let raw = ModelRaw::new(&Matrix4::from_scale(2.0), &material);
        assert_eq!(raw.shininess, 32.0);
        assert_eq!(raw.diffuse, [0.8, 0.8, 0.8]);
        assert_eq!(raw.normal[0][0], 0.5);
    }
}
