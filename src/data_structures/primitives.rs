//! Static vertex/index tables for the shapes the scene is assembled from.
//!
//! Every table uses counter-clockwise front faces and interleaves position,
//! normal and texture coordinates per vertex.

use std::str::FromStr;

const XLONG: u32 = 30;
const YLAT: u32 = 30;
const SPHERE_RADIUS: f64 = 0.5;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

const fn v(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> PrimitiveVertex {
    PrimitiveVertex {
        position,
        normal,
        tex_coords,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<PrimitiveVertex>,
    pub indices: Vec<u32>,
}

/// Position-only geometry used for lamps.
#[derive(Clone, Debug, Default)]
pub struct LampGeometry {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Sphere,
    Cube,
    Triangle,
    TwoTriangles,
    /// The quad with its texture repeated four times along each axis.
    TwoTrianglesLooped,
}

impl Primitive {
    pub fn geometry(self) -> Geometry {
        match self {
            Primitive::Sphere => sphere(),
            Primitive::Cube => cube(),
            Primitive::Triangle => Geometry {
                vertices: QUAD[..3].to_vec(),
                indices: vec![0, 1, 2],
            },
            Primitive::TwoTriangles => Geometry {
                vertices: QUAD.to_vec(),
                indices: QUAD_INDICES.to_vec(),
            },
            Primitive::TwoTrianglesLooped => Geometry {
                vertices: QUAD
                    .iter()
                    .map(|vertex| PrimitiveVertex {
                        tex_coords: vertex.tex_coords.map(|c| c * 4.0),
                        ..*vertex
                    })
                    .collect(),
                indices: QUAD_INDICES.to_vec(),
            },
        }
    }
}

impl FromStr for Primitive {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Primitive::Sphere),
            "cube" => Ok(Primitive::Cube),
            "triangle" => Ok(Primitive::Triangle),
            "two triangles" => Ok(Primitive::TwoTriangles),
            "two triangles looped" | "two triangles (loop texture)" => {
                Ok(Primitive::TwoTrianglesLooped)
            }
            other => Err(anyhow::anyhow!("unknown primitive {other:?}")),
        }
    }
}

#[rustfmt::skip]
const QUAD: [PrimitiveVertex; 4] = [
    v([-0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    v([-0.5, 0.0,  0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    v([ 0.5, 0.0,  0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([ 0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

fn sphere_points() -> impl Iterator<Item = ([f32; 3], [f32; 2])> {
    (0..YLAT).flat_map(|j| {
        let b = (-90.0 + 180.0 * j as f64 / (YLAT - 1) as f64).to_radians();
        (0..XLONG).map(move |i| {
            let a = (360.0 * i as f64 / (XLONG - 1) as f64).to_radians();
            let unit = [
                (b.cos() * a.sin()) as f32,
                b.sin() as f32,
                (b.cos() * a.cos()) as f32,
            ];
            let uv = [
                i as f32 / (XLONG - 1) as f32,
                j as f32 / (YLAT - 1) as f32,
            ];
            (unit, uv)
        })
    })
}

fn sphere_indices() -> Vec<u32> {
    let mut indices = Vec::with_capacity(((XLONG - 1) * (YLAT - 1) * 6) as usize);
    for j in 0..YLAT - 1 {
        for i in 0..XLONG - 1 {
            indices.extend_from_slice(&[
                j * XLONG + i,
                j * XLONG + i + 1,
                (j + 1) * XLONG + i + 1,
                j * XLONG + i,
                (j + 1) * XLONG + i + 1,
                (j + 1) * XLONG + i,
            ]);
        }
    }
    indices
}

fn sphere() -> Geometry {
    let r = SPHERE_RADIUS as f32;
    Geometry {
        vertices: sphere_points()
            .map(|(unit, uv)| v(unit.map(|c| c * r), unit, uv))
            .collect(),
        indices: sphere_indices(),
    }
}

fn cube() -> Geometry {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z
        v([-p, -p,  p], [0.0, 0.0, 1.0], [0.0, 1.0]),
        v([ p, -p,  p], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([-p,  p,  p], [0.0, 0.0, 1.0], [0.0, 0.0]),
        // -Z
        v([ p, -p, -p], [0.0, 0.0, -1.0], [0.0, 1.0]),
        v([-p, -p, -p], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([-p,  p, -p], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0], [0.0, 0.0]),
        // +X
        v([ p, -p,  p], [1.0, 0.0, 0.0], [0.0, 1.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([ p,  p, -p], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([ p,  p,  p], [1.0, 0.0, 0.0], [0.0, 0.0]),
        // -X
        v([-p, -p, -p], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        v([-p, -p,  p], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([-p,  p,  p], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([-p,  p, -p], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        // +Y
        v([-p,  p,  p], [0.0, 1.0, 0.0], [0.0, 1.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([ p,  p, -p], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([-p,  p, -p], [0.0, 1.0, 0.0], [0.0, 0.0]),
        // -Y
        v([-p, -p, -p], [0.0, -1.0, 0.0], [0.0, 1.0]),
        v([ p, -p, -p], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([-p, -p,  p], [0.0, -1.0, 0.0], [0.0, 0.0]),
    ];
    let indices = (0..6u32)
        .flat_map(|face| [0, 1, 2, 2, 3, 0].map(|i| face * 4 + i))
        .collect();
    Geometry { vertices, indices }
}

/// The eight-corner cube drawn for the global light.
pub fn lamp_cube() -> LampGeometry {
    #[rustfmt::skip]
    let positions = vec![
        [-0.5, -0.5, -0.5],
        [-0.5, -0.5,  0.5],
        [-0.5,  0.5, -0.5],
        [-0.5,  0.5,  0.5],
        [ 0.5, -0.5, -0.5],
        [ 0.5, -0.5,  0.5],
        [ 0.5,  0.5, -0.5],
        [ 0.5,  0.5,  0.5],
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 3, 3, 2, 0, // -x
        4, 6, 7, 7, 5, 4, // +x
        1, 5, 7, 7, 3, 1, // +z
        6, 4, 0, 0, 2, 6, // -z
        0, 4, 5, 5, 1, 0, // -y
        2, 3, 7, 7, 6, 2, // +y
    ];
    LampGeometry { positions, indices }
}

/// The sphere without normals or texture coordinates, drawn for the spotlight.
pub fn lamp_sphere() -> LampGeometry {
    let r = SPHERE_RADIUS as f32;
    LampGeometry {
        positions: sphere_points().map(|(unit, _)| unit.map(|c| c * r)).collect(),
        indices: sphere_indices(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vector3<f32> {
        let (a, b, c) = (Vector3::from(a), Vector3::from(b), Vector3::from(c));
        (b - a).cross(c - a)
    }

    /// Non-degenerate triangles of a closed shape centred on the origin face outwards.
    fn assert_outward(positions: &[[f32; 3]], indices: &[u32]) {
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| positions[tri[k] as usize]);
            let normal = face_normal(a, b, c);
            if normal.magnitude() < 1e-6 {
                continue;
            }
            let centroid = (Vector3::from(a) + Vector3::from(b) + Vector3::from(c)) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn sphere_has_expected_counts() {
        let sphere = Primitive::Sphere.geometry();
        assert_eq!(sphere.vertices.len(), 900);
        assert_eq!(sphere.indices.len(), 29 * 29 * 6);
        assert!(sphere.indices.iter().all(|&i| (i as usize) < sphere.vertices.len()));
        assert_eq!(&sphere.indices[..6], &[0, 1, 31, 0, 31, 30]);
    }

    #[test]
    fn sphere_normals_are_unit_and_radial() {
        for vertex in Primitive::Sphere.geometry().vertices {
            let normal = Vector3::from(vertex.normal);
            assert!((normal.magnitude() - 1.0).abs() < 1e-5);
            let position = Vector3::from(vertex.position);
            assert!((position - normal * 0.5).magnitude() < 1e-5);
        }
    }

    #[test]
    fn closed_shapes_wind_counter_clockwise_from_outside() {
        let sphere = Primitive::Sphere.geometry();
        let positions: Vec<_> = sphere.vertices.iter().map(|v| v.position).collect();
        assert_outward(&positions, &sphere.indices);

        let cube = Primitive::Cube.geometry();
        let positions: Vec<_> = cube.vertices.iter().map(|v| v.position).collect();
        assert_outward(&positions, &cube.indices);

        let lamp = lamp_cube();
        assert_outward(&lamp.positions, &lamp.indices);
    }

    #[test]
    fn cube_face_normals_match_winding() {
        let cube = Primitive::Cube.geometry();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        for tri in cube.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| cube.vertices[tri[k] as usize]);
            let normal = face_normal(a.position, b.position, c.position).normalize();
            assert!((normal - Vector3::from(a.normal)).magnitude() < 1e-5);
        }
    }

    #[test]
    fn quads_face_up() {
        for primitive in [
            Primitive::Triangle,
            Primitive::TwoTriangles,
            Primitive::TwoTrianglesLooped,
        ] {
            let geometry = primitive.geometry();
            for tri in geometry.indices.chunks(3) {
                let [a, b, c] = [0, 1, 2].map(|k| geometry.vertices[tri[k] as usize].position);
                assert!(face_normal(a, b, c).y > 0.0, "{primitive:?}");
            }
        }
    }

    #[test]
    fn looped_quad_repeats_texture_four_times() {
        let plain = Primitive::TwoTriangles.geometry();
        let looped = Primitive::TwoTrianglesLooped.geometry();
        for (p, l) in plain.vertices.iter().zip(&looped.vertices) {
            assert_eq!(p.position, l.position);
            assert_eq!([p.tex_coords[0] * 4.0, p.tex_coords[1] * 4.0], l.tex_coords);
        }
    }

    #[test]
    fn triangle_is_the_first_half_of_the_quad() {
        let triangle = Primitive::Triangle.geometry();
        assert_eq!(triangle.vertices, QUAD[..3].to_vec());
        assert_eq!(triangle.indices, vec![0, 1, 2]);
    }

    #[test]
    fn lamp_sphere_matches_sphere_positions() {
        let lamp = lamp_sphere();
        let sphere = Primitive::Sphere.geometry();
        assert_eq!(lamp.indices, sphere.indices);
        for (l, s) in lamp.positions.iter().zip(&sphere.vertices) {
            assert_eq!(*l, s.position);
        }
    }

    #[test]
    fn names_parse() {
        assert_eq!("two triangles".parse::<Primitive>().unwrap(), Primitive::TwoTriangles);
        assert_eq!("Sphere".parse::<Primitive>().unwrap(), Primitive::Sphere);
        assert!("teapot".parse::<Primitive>().is_err());
    }
}
