//! GPU textures and texture creation utilities.
//!
//! [`Texture`] wraps a wgpu texture together with its view. Image textures get a
//! full mip chain generated on the CPU; they are sampled through the shared
//! repeat sampler of [`create_default_sampler`]. The depth buffer and 1×1
//! fallbacks are created here as well.

use anyhow::*;
use image::{DynamicImage, GenericImageView, imageops::FilterType};

#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// A 1×1 texture of a single colour.
    ///
    /// Stands in for maps that failed to load so the pipelines never need a
    /// variant without that binding.
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
        linear: bool,
    ) -> Self {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(1, 1, image::Rgba(rgba)));
        Self::upload(device, queue, &img, Some(label), linear)
    }

    /// Flat normal map (+Z in tangent space).
    pub fn create_default_normal_map(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::solid(device, queue, [127, 127, 255, 255], "default normal map", true)
    }

    /// Decode raw image file bytes and upload them.
    ///
    /// `linear` selects `Rgba8Unorm` for data maps (normal, metallic, roughness,
    /// ambient occlusion); colour maps are uploaded as sRGB.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        linear: bool,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes).with_context(|| format!("decoding {label}"))?;
        Self::from_image(device, queue, &img, Some(label), linear)
    }

    /// Upload `img`, refusing images the device cannot hold.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        label: Option<&str>,
        linear: bool,
    ) -> Result<Self> {
        let (width, height) = img.dimensions();
        check_dimensions(width, height, device.limits().max_texture_dimension_2d)
            .with_context(|| format!("uploading {}", label.unwrap_or("texture")))?;
        Ok(Self::upload(device, queue, img, label, linear))
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        label: Option<&str>,
        linear: bool,
    ) -> Self {
        let (width, height) = img.dimensions();
        let mip_level_count = mip_level_count(width, height);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let format = if linear {
            wgpu::TextureFormat::Rgba8Unorm
        } else {
            wgpu::TextureFormat::Rgba8UnormSrgb
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in mip_chain(img).into_iter().enumerate() {
            let rgba = level.to_rgba8();
            let (w, h) = rgba.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                &rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    pub fn dispose(&self) {
        self.texture.destroy();
    }
}

/// Fails when either side is zero or larger than `max_dimension`.
pub fn check_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<()> {
    ensure!(width > 0 && height > 0, "image is empty ({width}x{height})");
    ensure!(
        width <= max_dimension && height <= max_dimension,
        "image is {width}x{height}, the device allows at most {max_dimension} per side"
    );
    Ok(())
}

/// Number of levels down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Level 0 is `img` itself; every further level halves each side (never below 1).
pub fn mip_chain(img: &DynamicImage) -> Vec<DynamicImage> {
    let (width, height) = img.dimensions();
    let count = mip_level_count(width, height);
    let mut levels = Vec::with_capacity(count as usize);
    levels.push(img.clone());
    for level in 1..count {
        let w = (width >> level).max(1);
        let h = (height >> level).max(1);
        let previous = &levels[level as usize - 1];
        levels.push(previous.resize_exact(w, h, FilterType::Triangle));
    }
    levels
}

/// Repeat wrapping, linear filtering between texels and mip levels.
pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_images_are_refused() {
        assert!(check_dimensions(8192, 8192, 8192).is_ok());
        assert!(check_dimensions(9000, 1, 8192).is_err());
        assert!(check_dimensions(1, 9000, 8192).is_err());
        assert!(check_dimensions(0, 4, 8192).is_err());
    }

    #[test]
    fn mip_count_reaches_one_texel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 17), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn mip_chain_halves_each_level() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(8, 2, image::Rgba([200, 10, 10, 255])));
        let dims: Vec<_> = mip_chain(&img).iter().map(|level| level.dimensions()).collect();
        assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn mip_chain_preserves_flat_colour() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(4, 4, image::Rgba([90, 120, 30, 255])));
        let last = mip_chain(&img).pop().expect("at least one level");
        assert_eq!(last.to_rgba8().get_pixel(0, 0).0, [90, 120, 30, 255]);
    }
}
