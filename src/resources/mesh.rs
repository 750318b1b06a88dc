use cgmath::{Vector2, Vector3};

use crate::data_structures::{
    model::{LampVertex, Mesh, ModelVertex},
    primitives::{Geometry, LampGeometry},
};

/// Upload a primitive shape with tangents for normal mapping.
pub fn build_mesh(device: &wgpu::Device, name: &str, geometry: &Geometry) -> Mesh {
    let vertices = model_vertices(geometry);
    Mesh::new(device, name, &vertices, &geometry.indices)
}

pub fn build_lamp_mesh(device: &wgpu::Device, name: &str, geometry: &LampGeometry) -> Mesh {
    let vertices: Vec<_> = geometry
        .positions
        .iter()
        .map(|&position| LampVertex { position })
        .collect();
    Mesh::new(device, name, &vertices, &geometry.indices)
}

/// The primitive tables carry no tangents, so they are derived from the
/// texture coordinates here and averaged over every triangle a vertex is in.
pub fn model_vertices(geometry: &Geometry) -> Vec<ModelVertex> {
    let mut vertices: Vec<ModelVertex> = geometry
        .vertices
        .iter()
        .map(|v| ModelVertex {
            position: v.position,
            tex_coords: v.tex_coords,
            normal: v.normal,
            // Calculated below
            tangent: [0.0; 3],
            bitangent: [0.0; 3],
        })
        .collect();

    let mut triangles_included = vec![0u32; vertices.len()];

    for c in geometry.indices.chunks_exact(3) {
        let [i0, i1, i2] = [c[0] as usize, c[1] as usize, c[2] as usize];
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);

        let pos0: Vector3<f32> = v0.position.into();
        let pos1: Vector3<f32> = v1.position.into();
        let pos2: Vector3<f32> = v2.position.into();

        let uv0: Vector2<f32> = v0.tex_coords.into();
        let uv1: Vector2<f32> = v1.tex_coords.into();
        let uv2: Vector2<f32> = v2.tex_coords.into();

        let delta_pos1 = pos1 - pos0;
        let delta_pos2 = pos2 - pos0;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv0;

        //     delta_pos1 = delta_uv1.x * T + delta_uv1.y * B
        //     delta_pos2 = delta_uv2.x * T + delta_uv2.y * B
        let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        // Flipped for right-handed normal maps in wgpu's texture space
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;

        for i in [i0, i1, i2] {
            let v = &mut vertices[i];
            v.tangent = (tangent + Vector3::from(v.tangent)).into();
            v.bitangent = (bitangent + Vector3::from(v.bitangent)).into();
            triangles_included[i] += 1;
        }
    }

    for (v, n) in vertices.iter_mut().zip(triangles_included) {
        if n == 0 {
            continue;
        }
        let denom = 1.0 / n as f32;
        v.tangent = (Vector3::from(v.tangent) * denom).into();
        v.bitangent = (Vector3::from(v.bitangent) * denom).into();
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::primitives::Primitive;
    use cgmath::InnerSpace;

    #[test]
    fn quad_tangents_follow_u() {
        for v in model_vertices(&Primitive::TwoTriangles.geometry()) {
            assert!((Vector3::from(v.tangent) - Vector3::unit_x()).magnitude() < 1e-5);
            assert!((Vector3::from(v.bitangent) - Vector3::unit_z()).magnitude() < 1e-5);
        }
    }

    #[test]
    fn looped_quad_tangents_are_shorter_but_parallel() {
        for v in model_vertices(&Primitive::TwoTrianglesLooped.geometry()) {
            let tangent = Vector3::from(v.tangent);
            assert!((tangent.normalize() - Vector3::unit_x()).magnitude() < 1e-5);
            assert!((tangent.magnitude() - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_tangents_are_finite() {
        let vertices = model_vertices(&Primitive::Sphere.geometry());
        assert!(
            vertices
                .iter()
                .flat_map(|v| v.tangent.into_iter().chain(v.bitangent))
                .all(f32::is_finite)
        );
    }

    #[test]
    fn attributes_are_copied_through() {
        let geometry = Primitive::Cube.geometry();
        let vertices = model_vertices(&geometry);
        for (src, dst) in geometry.vertices.iter().zip(&vertices) {
            assert_eq!(src.position, dst.position);
            assert_eq!(src.normal, dst.normal);
            assert_eq!(src.tex_coords, dst.tex_coords);
        }
    }
}
