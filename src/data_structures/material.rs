use cgmath::Vector3;

/// Phong reflectance of a surface, or the colour contribution of a light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub const fn new(
        ambient: Vector3<f32>,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Same material with all three colours multiplied by `intensity`.
    pub fn scaled(&self, intensity: f32) -> Self {
        Self {
            ambient: self.ambient * intensity,
            diffuse: self.diffuse * intensity,
            specular: self.specular * intensity,
            shininess: self.shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.8, 0.8, 0.8),
            Vector3::new(0.5, 0.5, 0.5),
            32.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_keeps_shininess() {
        let material = Material::default().scaled(0.5);
        assert_eq!(material.ambient, Vector3::new(0.25, 0.25, 0.25));
        assert_eq!(material.diffuse, Vector3::new(0.4, 0.4, 0.4));
        assert_eq!(material.specular, Vector3::new(0.25, 0.25, 0.25));
        assert_eq!(material.shininess, 32.0);
    }

    #[test]
    fn zero_intensity_is_black() {
        let material = Material::default().scaled(0.0);
        assert_eq!(material.ambient, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(material.specular, Vector3::new(0.0, 0.0, 0.0));
    }
}
