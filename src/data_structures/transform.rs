//! Placement of a model in the world: translation, rotation and scale.

use cgmath::{Deg, Matrix, Matrix4, Quaternion, Rotation3, SquareMatrix, Vector3};

/// Rotation about X first, then Y, then Z.
pub fn rotation_from_degrees(x: f32, y: f32, z: f32) -> Quaternion<f32> {
    Quaternion::from_angle_z(Deg(z)) * Quaternion::from_angle_y(Deg(y)) * Quaternion::from_angle_x(Deg(x))
}

/// `T · Rz · Ry · Rx · S` with the rotation given in degrees.
pub fn prepare_model_matrix(
    scale: Vector3<f32>,
    rotate_degrees: Vector3<f32>,
    translate: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(translate)
        * Matrix4::from(rotation_from_degrees(rotate_degrees.x, rotate_degrees.y, rotate_degrees.z))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Inverse-transpose of `model`, falling back to `model` itself when it is singular.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
    match model.invert() {
        Some(inverse) => inverse.transpose(),
        None => {
            log::warn!("model matrix is singular; normals are transformed without correction");
            *model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, Point3, Transform};

    fn assert_matrix_close(a: Matrix4<f32>, b: Matrix4<f32>) {
        let a: [[f32; 4]; 4] = a.into();
        let b: [[f32; 4]; 4] = b.into();
        for (col_a, col_b) in a.iter().zip(&b) {
            for (x, y) in col_a.iter().zip(col_b) {
                assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
            }
        }
    }

    #[test]
    fn matches_explicit_composition() {
        let expected = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_angle_z(Deg(30.0))
            * Matrix4::from_angle_y(Deg(45.0))
            * Matrix4::from_angle_x(Deg(60.0))
            * Matrix4::from_nonuniform_scale(2.0, 3.0, 4.0);
        let actual = prepare_model_matrix(
            Vector3::new(2.0, 3.0, 4.0),
            Vector3::new(60.0, 45.0, 30.0),
            Vector3::new(1.0, 2.0, 3.0),
        );
        assert_matrix_close(actual, expected);
    }

    #[test]
    fn floor_matrix_scales_the_quad() {
        let floor = prepare_model_matrix(
            Vector3::new(6.0, 1.0, 6.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
        let corner = floor.transform_point(Point3::new(0.5, 0.0, 0.5));
        assert!((corner.to_vec() - Vector3::new(3.0, 0.0, 3.0)).magnitude() < 1e-6);
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
        let model = prepare_model_matrix(
            Vector3::new(1.0, 4.0, 1.0),
            Vector3::new(0.0, 0.0, 45.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
        let tangent = model.transform_vector(Vector3::new(1.0, 1.0, 0.0));
        let normal = normal_matrix(&model).transform_vector(Vector3::new(1.0, -1.0, 0.0));
        assert!(tangent.dot(normal).abs() < 1e-4);
    }

    #[test]
    fn rotation_applies_x_before_z() {
        let rotation = rotation_from_degrees(90.0, 0.0, 90.0);
        let rotated = rotation * Vector3::new(0.0, 1.0, 0.0);
        // X takes +Y to +Z, and Z leaves +Z alone.
        assert!((rotated - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn singular_model_falls_back_to_itself() {
        let model = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);
        assert_eq!(normal_matrix(&model), model);
    }
}
