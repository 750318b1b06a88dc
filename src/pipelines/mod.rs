//! Render programs and the bind group layouts they share.
//!
//! Each program is read from WGSL in the asset directory and compiled at
//! start-up. A program that fails to load, compile or link is logged and left
//! out; whatever it would have drawn is skipped.

use std::path::Path;

use crate::{
    data_structures::model::Shading,
    resources::texture::{diffuse_specular_layout, pbr_maps_layout},
};

pub mod basic;
pub mod light;
pub mod pbr;
pub mod phong;
pub mod uniform;

#[derive(Debug)]
pub struct Layouts {
    /// Group 0 of the lit programs: camera and lights.
    pub scene: wgpu::BindGroupLayout,
    /// Group 1 of the lit programs: model matrix and material.
    pub model: wgpu::BindGroupLayout,
    /// Group 0 of the lamp program.
    pub lamp: wgpu::BindGroupLayout,
    pub phong_textures: wgpu::BindGroupLayout,
    pub pbr_textures: wgpu::BindGroupLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            scene: uniform::uniform_layout(device, "scene_bind_group_layout"),
            model: uniform::uniform_layout(device, "model_bind_group_layout"),
            lamp: uniform::uniform_layout(device, "lamp_bind_group_layout"),
            phong_textures: diffuse_specular_layout(device),
            pbr_textures: pbr_maps_layout(device),
        }
    }
}

#[derive(Debug, Default)]
pub struct Pipelines {
    pub lamp: Option<wgpu::RenderPipeline>,
    pub phong: Option<wgpu::RenderPipeline>,
    pub pbr: Option<wgpu::RenderPipeline>,
}

impl Pipelines {
    pub async fn load(
        device: &wgpu::Device,
        layouts: &Layouts,
        color_format: wgpu::TextureFormat,
        root: &Path,
    ) -> Self {
        let (lamp, phong, pbr) = futures::join!(
            basic::load_shader(device, root, light::SHADER),
            basic::load_shader(device, root, phong::SHADER),
            basic::load_shader(device, root, pbr::SHADER),
        );

        let lamp = match lamp {
            Some(shader) => {
                basic::validated(device, light::SHADER, || {
                    light::mk_lamp_pipeline(device, layouts, color_format, &shader)
                })
                .await
            }
            None => None,
        };
        let phong = match phong {
            Some(shader) => {
                basic::validated(device, phong::SHADER, || {
                    phong::mk_phong_pipeline(device, layouts, color_format, &shader)
                })
                .await
            }
            None => None,
        };
        let pbr = match pbr {
            Some(shader) => {
                basic::validated(device, pbr::SHADER, || {
                    pbr::mk_pbr_pipeline(device, layouts, color_format, &shader)
                })
                .await
            }
            None => None,
        };

        log::info!(
            "programs ready: lamp={} phong={} pbr={}",
            lamp.is_some(),
            phong.is_some(),
            pbr.is_some()
        );
        Self { lamp, phong, pbr }
    }

    pub fn lit(&self, shading: Shading) -> Option<&wgpu::RenderPipeline> {
        match shading {
            Shading::Phong => self.phong.as_ref(),
            Shading::Pbr => self.pbr.as_ref(),
        }
    }
}
