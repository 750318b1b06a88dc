use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    data_structures::texture::{Texture, create_default_sampler},
    resources::texture::load_texture,
};

/// A texture file to load and the name it is looked up by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureSource {
    pub name: &'static str,
    pub file: &'static str,
    /// Data maps are sampled without sRGB decoding.
    pub linear: bool,
}

/// Named textures loaded from the asset directory.
///
/// Only flat 2D images are handled. Cube maps and skyboxes are not loaded,
/// so the scene has no environment lighting.
#[derive(Debug)]
pub struct TextureLibrary {
    root: PathBuf,
    textures: HashMap<String, Texture>,
}

impl TextureLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `source` and store it under its name. A failure is logged and
    /// leaves the library unchanged.
    pub async fn add(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, source: TextureSource) -> bool {
        match load_texture(&self.root, source.file, source.linear, device, queue).await {
            Ok(texture) => {
                self.insert(source.name, texture);
                true
            }
            Err(e) => {
                log::error!("Error loading texture {}: {e:#}", source.file);
                false
            }
        }
    }

    /// Load every source concurrently. Returns how many were stored.
    pub async fn add_all(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sources: &[TextureSource],
    ) -> usize {
        let root = self.root.clone();
        let loads = sources.iter().map(|source| {
            let root = &root;
            async move {
                let result = load_texture(root, source.file, source.linear, device, queue).await;
                (source, result)
            }
        });
        let mut loaded = 0;
        for (source, result) in futures::future::join_all(loads).await {
            match result {
                Ok(texture) => {
                    self.insert(source.name, texture);
                    loaded += 1;
                }
                Err(e) => log::error!("Error loading texture {}: {e:#}", source.file),
            }
        }
        log::info!("loaded {loaded} of {} textures from {}", sources.len(), self.root.display());
        loaded
    }

    pub fn insert(&mut self, name: &str, texture: Texture) {
        if let Some(previous) = self.textures.insert(name.to_string(), texture) {
            previous.dispose();
        }
    }

    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Destroys every texture and empties the library.
    pub fn dispose(&mut self) {
        for (_, texture) in self.textures.drain() {
            texture.dispose();
        }
    }
}

/// 1×1 stand-ins bound in place of maps that are missing.
#[derive(Debug)]
pub struct FallbackTextures {
    pub white: Texture,
    pub black: Texture,
    pub normal: Texture,
    pub sampler: wgpu::Sampler,
}

impl FallbackTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            white: Texture::solid(device, queue, [255, 255, 255, 255], "fallback white", true),
            black: Texture::solid(device, queue, [0, 0, 0, 255], "fallback black", true),
            normal: Texture::create_default_normal_map(device, queue),
            sampler: create_default_sampler(device),
        }
    }
}
