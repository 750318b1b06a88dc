//! Scene data: the values that describe what is drawn and the GPU objects
//! built from them.
//!
//! - `primitives` holds the static vertex/index tables
//! - `transform` composes model matrices
//! - `material` and `light` are plain values mutated by the UI
//! - `texture` wraps GPU textures, `model` pairs a mesh with its material
//! - `room` assembles the floor in both shading variants

pub mod light;
pub mod material;
pub mod model;
pub mod primitives;
pub mod room;
pub mod texture;
pub mod transform;
