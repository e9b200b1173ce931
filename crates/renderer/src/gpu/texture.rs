use image::RgbaImage;
use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::error::OverlayError;

pub(crate) struct OverlayTexture {
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl OverlayTexture {
    /// Uploads decoded pixels as a linearly filtered, edge-clamped 2D texture.
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        format: wgpu::TextureFormat,
    ) -> Result<Self, OverlayError> {
        let (width, height) = image.dimensions();
        let limit = device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            return Err(OverlayError::AssetTooLarge {
                width,
                height,
                limit,
            });
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("overlay image texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            image.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("overlay image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        tracing::debug!(width, height, ?format, "uploaded overlay texture");

        Ok(Self {
            _texture: texture,
            view,
            sampler,
            size: (width, height),
        })
    }
}
