//! Light sources and the two-light rig the scene controls expose.

use std::{convert::Infallible, fmt, str::FromStr};

use cgmath::{Deg, Matrix4, Vector3};

use crate::data_structures::material::Material;

pub const SPOT_CUT_OFF: Deg<f32> = Deg(12.5);
pub const SPOT_OUTER_CUT_OFF: Deg<f32> = Deg(17.5);
pub const ATTENUATION_CONSTANT: f32 = 1.0;
pub const ATTENUATION_LINEAR: f32 = 0.09;
pub const ATTENUATION_QUADRATIC: f32 = 0.032;
/// Lamps are drawn at this fraction of the unit primitive.
pub const LAMP_SCALE: f32 = 0.3;

/// Material every light starts out with.
pub const DEFAULT_LIGHT_MATERIAL: Material = Material::new(
    Vector3::new(0.4, 0.4, 0.4),
    Vector3::new(0.7, 0.7, 0.7),
    Vector3::new(0.7, 0.7, 0.7),
    32.0,
);

/// The shape a light's lamp is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LampShape {
    Cube,
    Sphere,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    /// Omnidirectional with distance attenuation.
    Point,
    /// Restricted to a cone around `direction`.
    Spot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    position: Vector3<f32>,
    direction: Vector3<f32>,
    material: Material,
    kind: LightKind,
    shape: LampShape,
}

impl Light {
    pub fn new(shape: LampShape) -> Self {
        Self {
            position: Vector3::new(3.0, 2.0, 1.0),
            direction: Vector3::new(-0.6, -1.0, -0.6),
            material: DEFAULT_LIGHT_MATERIAL,
            kind: LightKind::Point,
            shape,
        }
    }

    pub fn with_kind(mut self, kind: LightKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = direction;
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn shape(&self) -> LampShape {
        self.shape
    }

    pub fn lamp_model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from_scale(LAMP_SCALE)
    }
}

/// Preset positions of the global light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightPosition {
    #[default]
    Default,
    Top,
    Bottom,
    Left,
    Right,
}

impl LightPosition {
    pub const ALL: [LightPosition; 5] = [
        LightPosition::Default,
        LightPosition::Top,
        LightPosition::Bottom,
        LightPosition::Left,
        LightPosition::Right,
    ];

    pub fn position(self) -> Vector3<f32> {
        match self {
            LightPosition::Default => Vector3::new(0.0, 1.0, 0.0),
            LightPosition::Top => Vector3::new(0.0, 1.0, -3.0),
            LightPosition::Bottom => Vector3::new(0.0, 1.0, 3.0),
            LightPosition::Left => Vector3::new(-3.0, 1.0, 0.0),
            LightPosition::Right => Vector3::new(3.0, 1.0, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightPosition::Default => "Default",
            LightPosition::Top => "Top",
            LightPosition::Bottom => "Bottom",
            LightPosition::Left => "Left",
            LightPosition::Right => "Right",
        }
    }
}

impl fmt::Display for LightPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown names select [`LightPosition::Default`].
impl FromStr for LightPosition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Ok(Self::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(name))
            .unwrap_or_default())
    }
}

/// The global point light and the overhead spotlight, plus their starting materials.
#[derive(Clone, Debug)]
pub struct LightRig {
    lights: [Light; 2],
    default_global: Material,
    default_spot: Material,
}

impl LightRig {
    pub const GLOBAL: usize = 0;
    pub const SPOT: usize = 1;

    pub fn new() -> Self {
        let mut global = Light::new(LampShape::Cube);
        global.set_position(LightPosition::Default.position());

        let mut spot = Light::new(LampShape::Sphere).with_kind(LightKind::Spot);
        spot.set_position_xyz(0.0, 20.0, 0.0);
        spot.set_direction(Vector3::new(0.0, -4.0, 0.0));

        Self {
            default_global: *global.material(),
            default_spot: *spot.material(),
            lights: [global, spot],
        }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn global(&self) -> &Light {
        &self.lights[Self::GLOBAL]
    }

    pub fn spotlight(&self) -> &Light {
        &self.lights[Self::SPOT]
    }

    /// `intensity` is a fraction of the starting brightness, 1.0 restores it.
    pub fn change_global_light_intensity(&mut self, intensity: f32) {
        let material = self.default_global.scaled(intensity);
        self.lights[Self::GLOBAL].set_material(material);
    }

    pub fn change_spotlight_intensity(&mut self, intensity: f32) {
        let material = self.default_spot.scaled(intensity);
        self.lights[Self::SPOT].set_material(material);
    }

    pub fn change_global_light_position(&mut self, position: LightPosition) {
        self.lights[Self::GLOBAL].set_position(position.position());
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, Point3, Transform};

    #[test]
    fn new_light_uses_documented_defaults() {
        let light = Light::new(LampShape::Cube);
        assert_eq!(light.position(), Vector3::new(3.0, 2.0, 1.0));
        assert_eq!(light.direction(), Vector3::new(-0.6, -1.0, -0.6));
        assert_eq!(light.material().ambient, Vector3::new(0.4, 0.4, 0.4));
        assert_eq!(light.material().diffuse, Vector3::new(0.7, 0.7, 0.7));
        assert_eq!(light.kind(), LightKind::Point);
    }

    #[test]
    fn lamp_is_scaled_then_moved() {
        let mut light = Light::new(LampShape::Sphere);
        light.set_position_xyz(1.0, 2.0, 3.0);
        let corner = light.lamp_model_matrix().transform_point(Point3::new(0.5, 0.5, 0.5));
        let expected = Vector3::new(1.15, 2.15, 3.15);
        assert!((corner.to_vec() - expected).magnitude() < 1e-5);
    }

    #[test]
    fn rig_starts_with_global_and_spot() {
        let rig = LightRig::new();
        assert_eq!(rig.lights().len(), 2);
        assert_eq!(rig.global().position(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(rig.global().shape(), LampShape::Cube);
        assert_eq!(rig.spotlight().position(), Vector3::new(0.0, 20.0, 0.0));
        assert_eq!(rig.spotlight().direction(), Vector3::new(0.0, -4.0, 0.0));
        assert_eq!(rig.spotlight().kind(), LightKind::Spot);
        assert_eq!(rig.spotlight().shape(), LampShape::Sphere);
    }

    #[test]
    fn intensity_is_relative_to_the_starting_material() {
        let mut rig = LightRig::new();
        rig.change_global_light_intensity(0.5);
        rig.change_global_light_intensity(0.5);
        assert_eq!(rig.global().material().diffuse, Vector3::new(0.35, 0.35, 0.35));
        assert_eq!(*rig.spotlight().material(), DEFAULT_LIGHT_MATERIAL);

        rig.change_spotlight_intensity(0.0);
        assert_eq!(rig.spotlight().material().specular, Vector3::new(0.0, 0.0, 0.0));
        rig.change_spotlight_intensity(1.0);
        assert_eq!(*rig.spotlight().material(), DEFAULT_LIGHT_MATERIAL);
    }

    #[test]
    fn presets_move_only_the_global_light() {
        let mut rig = LightRig::new();
        rig.change_global_light_position(LightPosition::Left);
        assert_eq!(rig.global().position(), Vector3::new(-3.0, 1.0, 0.0));
        assert_eq!(rig.spotlight().position(), Vector3::new(0.0, 20.0, 0.0));
        rig.change_global_light_position(LightPosition::Default);
        assert_eq!(rig.global().position(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn position_names_are_case_insensitive_with_default_fallback() {
        assert_eq!("top".parse(), Ok(LightPosition::Top));
        assert_eq!("BOTTOM".parse(), Ok(LightPosition::Bottom));
        assert_eq!(" Right ".parse(), Ok(LightPosition::Right));
        assert_eq!("ceiling".parse(), Ok(LightPosition::Default));
        assert_eq!(LightPosition::Top.position(), Vector3::new(0.0, 1.0, -3.0));
        assert_eq!(LightPosition::Bottom.position(), Vector3::new(0.0, 1.0, 3.0));
    }
}
