//! The spacecraft interior. For now that is the floor, built once per shading
//! model so the two can be compared side by side at runtime.

use cgmath::Vector3;

use crate::{
    context::Gpu,
    data_structures::{
        material::Material,
        model::{Model, Shading},
        primitives::Primitive,
        transform::prepare_model_matrix,
    },
    resources::texture_library::{TextureLibrary, TextureSource},
};

pub const ROOM_SIZE: f32 = 6.0;

/// Every texture the room samples, in the order the models take them.
pub const ROOM_TEXTURES: [TextureSource; 7] = [
    TextureSource { name: "phong_diffuse", file: "textures/phong1_diffuse.png", linear: false },
    TextureSource { name: "phong_specular", file: "textures/phong1_specular.png", linear: true },
    TextureSource { name: "pbr_albedo", file: "textures/pbr1_albedo.png", linear: false },
    TextureSource { name: "pbr_normal", file: "textures/pbr1_normal.png", linear: true },
    TextureSource { name: "pbr_metallic", file: "textures/pbr1_metallic.png", linear: true },
    TextureSource { name: "pbr_roughness", file: "textures/pbr1_roughness.png", linear: true },
    TextureSource { name: "pbr_ao", file: "textures/pbr1_ao.png", linear: true },
];

pub const FLOOR_MATERIAL: Material = Material::new(
    Vector3::new(0.5, 0.5, 0.5),
    Vector3::new(0.5, 0.5, 0.5),
    Vector3::new(0.3, 0.3, 0.3),
    4.0,
);

#[derive(Debug)]
pub struct Room {
    phong: Vec<Model>,
    pbr: Vec<Model>,
    shading: Shading,
}

impl Room {
    pub fn new(gpu: &Gpu, textures: &TextureLibrary) -> Self {
        let [diffuse, specular, albedo, normal, metallic, roughness, ao] =
            ROOM_TEXTURES.map(|source| textures.get(source.name));
        let floor_matrix = prepare_model_matrix(
            Vector3::new(ROOM_SIZE, 1.0, ROOM_SIZE),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        );

        let phong = vec![Model::make_part(
            gpu,
            "floor",
            FLOOR_MATERIAL,
            floor_matrix,
            &[diffuse, specular],
            Primitive::TwoTriangles,
        )];
        let pbr = vec![Model::make_part(
            gpu,
            "floor",
            FLOOR_MATERIAL,
            floor_matrix,
            &[albedo, normal, metallic, roughness, ao],
            Primitive::TwoTriangles,
        )];

        Self {
            phong,
            pbr,
            shading: Shading::Pbr,
        }
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    pub fn set_shading(&mut self, shading: Shading) {
        if shading != self.shading {
            log::info!("room shading: {shading:?}");
        }
        self.shading = shading;
    }

    /// Models of the active shading model.
    pub fn models(&self) -> &[Model] {
        match self.shading {
            Shading::Phong => &self.phong,
            Shading::Pbr => &self.pbr,
        }
    }

    pub fn dispose(&self) {
        self.phong.iter().chain(&self.pbr).for_each(Model::dispose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_room() -> Room {
        Room {
            phong: Vec::new(),
            pbr: Vec::new(),
            shading: Shading::Pbr,
        }
    }

    #[test]
    fn starts_with_pbr() {
        assert_eq!(empty_room().shading(), Shading::Pbr);
    }

    #[test]
    fn shading_switch_is_kept() {
        let mut room = empty_room();
        room.set_shading(Shading::Phong);
        assert_eq!(room.shading(), Shading::Phong);
        room.set_shading(Shading::Phong);
        assert_eq!(room.shading(), Shading::Phong);
        room.set_shading(Shading::Pbr);
        assert_eq!(room.shading(), Shading::Pbr);
    }

    #[test]
    fn texture_names_are_unique() {
        let mut names: Vec<_> = ROOM_TEXTURES.iter().map(|source| source.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ROOM_TEXTURES.len());
    }
}
