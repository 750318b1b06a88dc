//! Render composition and pipeline batching.
//!
//! The scene describes what to draw as a [`Render`] tree. Before drawing, the
//! tree is flattened into one batch per program so each pipeline is bound once
//! per frame, and batches whose program is missing are skipped as a whole.

use crate::{
    data_structures::model::{Model, Shading},
    pipelines::{Pipelines, light::Lamp},
};

pub enum Render<'a> {
    Lamp(&'a Lamp),
    Model(&'a Model),
    Composed(Vec<Render<'a>>),
}

/// Draw lists sorted by program, in submission order.
#[derive(Default)]
pub struct Batches<'a> {
    pub lamps: Vec<&'a Lamp>,
    pub phong: Vec<&'a Model>,
    pub pbr: Vec<&'a Model>,
}

impl<'a> Render<'a> {
    pub fn set_pipelines(self, batches: &mut Batches<'a>) {
        match self {
            Render::Lamp(lamp) => batches.lamps.push(lamp),
            Render::Model(model) => match model.shading() {
                Shading::Phong => batches.phong.push(model),
                Shading::Pbr => batches.pbr.push(model),
            },
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
        }
    }

    pub fn into_batches(self) -> Batches<'a> {
        let mut batches = Batches::default();
        self.set_pipelines(&mut batches);
        batches
    }
}

impl<'a> From<&'a Model> for Render<'a> {
    fn from(model: &'a Model) -> Self {
        Render::Model(model)
    }
}

impl<'a> From<&'a Lamp> for Render<'a> {
    fn from(lamp: &'a Lamp) -> Self {
        Render::Lamp(lamp)
    }
}

impl Batches<'_> {
    /// Record every batch into `render_pass`. `scene` is the camera/light
    /// bind group shared by the lit programs.
    pub fn draw(
        &self,
        pipelines: &Pipelines,
        queue: &wgpu::Queue,
        scene: &wgpu::BindGroup,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        if !self.lamps.is_empty() {
            match &pipelines.lamp {
                Some(pipeline) => {
                    render_pass.set_pipeline(pipeline);
                    self.lamps.iter().for_each(|lamp| lamp.render(render_pass));
                }
                None => log::trace!("lamp program missing, skipping {} lamps", self.lamps.len()),
            }
        }
        for (shading, models) in [(Shading::Phong, &self.phong), (Shading::Pbr, &self.pbr)] {
            if models.is_empty() {
                continue;
            }
            let Some(pipeline) = pipelines.lit(shading) else {
                log::trace!("{shading:?} program missing, skipping {} models", models.len());
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, scene, &[]);
            for model in models {
                model.render(queue, render_pass);
            }
        }
    }
}
