//! Start-up configuration of the demo window.
//!
//! There are no config files or CLI flags. Everything has a sensible default and
//! only the asset directory can be redirected through `SPACECRAFT_ASSETS`.

use std::path::PathBuf;

/// Environment variable that overrides where shaders and textures are read from.
pub const ASSETS_ENV: &str = "SPACECRAFT_ASSETS";

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Target frame rate of the render loop.
    pub fps: u32,
    pub clear_colour: wgpu::Color,
    pub asset_dir: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Phong & PBR Comparison".to_string(),
            width: 1024,
            height: 768,
            fps: 60,
            clear_colour: wgpu::Color::BLACK,
            asset_dir: default_asset_dir(),
        }
    }
}

impl SceneConfig {
    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ASSETS_ENV).filter(|dir| !dir.trim().is_empty()) {
            config.asset_dir = PathBuf::from(dir);
        }
        config
    }
}

fn default_asset_dir() -> PathBuf {
    let bundled = PathBuf::from(env!("SPACECRAFT_BUNDLED_ASSETS"));
    if bundled.exists() {
        bundled
    } else {
        PathBuf::from("./assets")
    }
}
