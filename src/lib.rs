//! spacecraft
//!
//! A small real-time scene of a spacecraft interior that renders the same
//! floor with Phong and with physically based shading, lit by a movable point
//! light and an overhead spotlight. A control panel adjusts both lights and
//! switches the shading model while the camera is flown with the keyboard
//! and mouse.
//!
//! High-level modules
//! - `camera`: look-at camera, projection and the keyboard/mouse controller
//! - `config`: start-up settings of the window and asset directory
//! - `context`: window, surface, device and everything shared per frame
//! - `data_structures`: primitives, lights, materials, textures and models
//! - `flow`: the winit event loop and frame pacing
//! - `gui`: the egui control panel
//! - `pipelines`: WGSL programs, their layouts and uniform blocks
//! - `render`: batching of draw calls by program
//! - `resources`: file loading, mesh building and the texture library
//! - `scene`: the lights, lamps and room tied together
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod gui;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use cgmath;
