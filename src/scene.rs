//! The spacecraft scene: textures, the light rig with its lamps, and the room.

use std::path::Path;

use cgmath::{Matrix4, Point3, SquareMatrix};

use crate::{
    context::Gpu,
    data_structures::{
        light::LightRig,
        room::{ROOM_TEXTURES, Room},
    },
    gui::UiAction,
    pipelines::{
        light::Lamp,
        uniform::{SceneRaw, Uniform},
    },
    render::Render,
    resources::texture_library::TextureLibrary,
};

#[derive(Debug)]
pub struct Scene {
    textures: TextureLibrary,
    rig: LightRig,
    lamps: Vec<Lamp>,
    room: Room,
    uniform: Uniform<SceneRaw>,
    disposed: bool,
}

impl Scene {
    /// Load the room textures from `asset_dir` and build lamps and room.
    /// Call [`Self::update`] before the first draw.
    pub async fn new(gpu: &Gpu<'_>, asset_dir: &Path) -> Self {
        let mut textures = TextureLibrary::new(asset_dir);
        textures.add_all(gpu.device, gpu.queue, &ROOM_TEXTURES).await;

        let rig = LightRig::new();
        let lamps = rig
            .lights()
            .iter()
            .map(|light| Lamp::new(gpu, light.shape()))
            .collect();
        let room = Room::new(gpu, &textures);
        let uniform = Uniform::new(
            gpu.device,
            &gpu.layouts.scene,
            "scene uniform",
            &SceneRaw::new(Matrix4::identity(), Point3::new(0.0, 0.0, 0.0), rig.lights()),
        );

        Self {
            textures,
            rig,
            lamps,
            room,
            uniform,
            disposed: false,
        }
    }

    pub fn rig(&self) -> &LightRig {
        &self.rig
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Apply a control panel action. `Quit` belongs to the window and is ignored.
    pub fn apply(&mut self, action: &UiAction) {
        match *action {
            UiAction::GlobalLightIntensity(intensity) => {
                self.rig.change_global_light_intensity(intensity)
            }
            UiAction::SpotlightIntensity(intensity) => self.rig.change_spotlight_intensity(intensity),
            UiAction::GlobalLightPosition(position) => {
                self.rig.change_global_light_position(position)
            }
            UiAction::Shading(shading) => self.room.set_shading(shading),
            UiAction::Quit => (),
        }
    }

    /// Upload camera and light state for the next frame. Returns `false`
    /// without touching the GPU once the scene is disposed.
    pub fn update(&self, queue: &wgpu::Queue, view_proj: Matrix4<f32>, view_pos: Point3<f32>) -> bool {
        if self.disposed {
            return false;
        }
        self.uniform
            .write(queue, &SceneRaw::new(view_proj, view_pos, self.rig.lights()));
        for (lamp, light) in self.lamps.iter().zip(self.rig.lights()) {
            lamp.update(queue, light, view_proj);
        }
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform.bind_group
    }

    /// Lamps first, then the room. Nothing once disposed.
    pub fn render(&self) -> Render<'_> {
        if self.disposed {
            return Render::Composed(Vec::new());
        }
        let lamps = self.lamps.iter().map(Render::from);
        let models = self.room.models().iter().map(Render::from);
        Render::Composed(lamps.chain(models).collect())
    }

    /// Release every GPU resource. Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.room.dispose();
        self.lamps.iter().for_each(Lamp::dispose);
        self.textures.dispose();
        self.uniform.dispose();
        log::info!("scene resources released");
    }
}
