use std::sync::Arc;

use anyhow::Context as _;
use cgmath::Deg;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraController, DEFAULT_POSITION, DEFAULT_TARGET, DEFAULT_UP, Projection},
    config::SceneConfig,
    data_structures::texture,
    pipelines::{Layouts, Pipelines},
    resources::texture_library::FallbackTextures,
};

pub const FOVY: Deg<f32> = Deg(45.0);
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;

/// The device-side pieces needed to build and draw scene objects. Borrowed
/// from a [`Context`], or assembled directly when there is no window.
#[derive(Clone, Copy, Debug)]
pub struct Gpu<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub layouts: &'a Layouts,
    pub fallbacks: &'a FallbackTextures,
}

/// Everything tied to the window and GPU device for the lifetime of the app.
#[derive(Debug)]
pub struct Context {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub depth_texture: texture::Texture,
    pub camera: Camera,
    pub controller: CameraController,
    pub projection: Projection,
    pub layouts: Layouts,
    pub pipelines: Pipelines,
    pub fallbacks: FallbackTextures,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>, scene_config: &SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this window")?;
        log::info!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("spacecraft device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("requesting the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The programs write linear colour and rely on an sRGB target for encoding.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut camera = Camera::new(DEFAULT_POSITION, DEFAULT_TARGET, DEFAULT_UP);
        camera.set_position(cgmath::Point3::new(0.0, 7.5, 0.01));
        camera.set_target(cgmath::Point3::new(0.0, -4.0, 0.0));
        let projection = Projection::new(config.width, config.height, FOVY, ZNEAR, ZFAR);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let layouts = Layouts::new(&device);
        let pipelines = Pipelines::load(&device, &layouts, config.format, &scene_config.asset_dir).await;
        let fallbacks = FallbackTextures::new(&device, &queue);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_texture,
            camera,
            controller: CameraController::new(),
            projection,
            layouts,
            pipelines,
            fallbacks,
            clear_colour: scene_config.clear_colour,
        })
    }

    /// Reconfigure the surface, depth buffer and projection for a new size.
    /// Zero-sized requests (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.projection.resize(width, height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        true
    }

    pub fn gpu(&self) -> Gpu<'_> {
        Gpu {
            device: &self.device,
            queue: &self.queue,
            layouts: &self.layouts,
            fallbacks: &self.fallbacks,
        }
    }

    pub fn view_proj(&self) -> cgmath::Matrix4<f32> {
        self.projection.calc_matrix() * self.camera.view_matrix()
    }
}
