use image::RgbaImage;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::error::OverlayError;
use crate::geometry::{build_quad, Quad};
use crate::types::Placement;

use super::context::{begin_clear_pass, GpuContext};
use super::pipeline::QuadPipeline;
use super::texture::OverlayTexture;

/// Everything needed to draw the overlay image into one window.
pub(crate) struct GpuState {
    context: GpuContext,
    texture: OverlayTexture,
    pipeline: QuadPipeline,
    quad: Quad,
    placement: Placement,
    flipped: bool,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        image: &RgbaImage,
        placement: Placement,
        flipped: bool,
    ) -> Result<Self, OverlayError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        let texture = OverlayTexture::upload(
            &context.device,
            &context.queue,
            image,
            context.texture_format(),
        )?;
        let quad = build_quad(
            placement,
            texture.size,
            (context.size.width, context.size.height),
            flipped,
        );
        let pipeline = QuadPipeline::new(
            &context.device,
            context.surface_format,
            context.premultiplied,
            &texture,
            &quad,
        );

        Ok(Self {
            context,
            texture,
            pipeline,
            quad,
            placement,
            flipped,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reconfigures the surface and recomputes the quad for the new size.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
        self.quad = build_quad(
            self.placement,
            self.texture.size,
            (self.context.size.width, self.context.size.height),
            self.flipped,
        );
        self.pipeline.update_quad(&self.context.queue, &self.quad);
        tracing::debug!(
            width = self.context.size.width,
            height = self.context.size.height,
            "overlay surface resized"
        );
    }

    /// Clears the frame to transparent and draws the image when `visible`.
    pub(crate) fn render(&mut self, visible: bool) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("overlay encoder"),
                });

        {
            let mut pass = begin_clear_pass(&mut encoder, &view, wgpu::Color::TRANSPARENT);
            if visible && !self.quad.is_empty() {
                self.pipeline.draw(&mut pass);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
