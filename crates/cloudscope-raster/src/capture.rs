//! Surface capture.

use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageResult, Rgba, RgbImage, RgbaImage};
use tracing::{debug, warn};

use cloudscope_model::{ExportError, Result};

use crate::scope::CaptureScope;
use crate::surface::RenderSurface;

/// What the captured image is for; decides the output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTarget {
    /// Embedded in a paginated document (reduced resolution).
    Document,
    /// The image itself is the deliverable (full resolution).
    Standalone,
}

/// Rasterizer settings.
#[derive(Debug, Clone)]
pub struct RasterizerConfig {
    /// Solid background forced while capturing.
    pub background: Rgba<u8>,
    /// Wait before capturing so pending visual updates settle.
    pub settle_delay: Duration,
    pub document_pixel_ratio: f32,
    pub standalone_pixel_ratio: f32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            background: Rgba([255, 255, 255, 255]),
            settle_delay: Duration::from_millis(50),
            document_pixel_ratio: 0.5,
            standalone_pixel_ratio: 1.0,
        }
    }
}

/// Captures render surfaces into bitmaps.
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    config: RasterizerConfig,
}

impl Rasterizer {
    pub fn new(config: RasterizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterizerConfig {
        &self.config
    }

    pub fn pixel_ratio(&self, target: CaptureTarget) -> f32 {
        match target {
            CaptureTarget::Document => self.config.document_pixel_ratio,
            CaptureTarget::Standalone => self.config.standalone_pixel_ratio,
        }
    }

    /// Capture the surface into an image.
    ///
    /// Fails with [`ExportError::SurfaceNotReady`] when there is no surface or
    /// it is not mounted, and with [`ExportError::CaptureFailure`] when
    /// rendering fails. The surface style is restored on every path.
    pub async fn capture(
        &self,
        surface: Option<&mut dyn RenderSurface>,
        target: CaptureTarget,
    ) -> Result<CapturedImage> {
        let Some(surface) = surface else {
            return Err(ExportError::SurfaceNotReady);
        };
        if !surface.is_mounted() {
            return Err(ExportError::SurfaceNotReady);
        }

        let pixel_ratio = self.pixel_ratio(target);
        let scope = CaptureScope::acquire(surface, self.config.background);
        tokio::time::sleep(self.config.settle_delay).await;
        let rendered = scope.surface().render(pixel_ratio);
        drop(scope);

        let image = rendered.map_err(|error| {
            warn!(%error, ?target, "surface capture failed");
            ExportError::capture(error)
        })?;
        debug!(
            width = image.width(),
            height = image.height(),
            pixel_ratio,
            ?target,
            "surface captured"
        );
        Ok(CapturedImage { image, pixel_ratio })
    }
}

/// A captured bitmap.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    image: RgbaImage,
    pixel_ratio: f32,
}

impl CapturedImage {
    pub fn new(image: RgbaImage, pixel_ratio: f32) -> Self {
        Self { image, pixel_ratio }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> ImageResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.image.clone()).write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    /// PNG as a `data:` URI.
    pub fn to_data_uri(&self) -> ImageResult<String> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    /// Alpha flattened onto white.
    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.image.width(), self.image.height(), |x, y| {
            let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
            let alpha = u32::from(a);
            let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
            image::Rgb([blend(r), blend(g), blend(b)])
        })
    }

    /// Encode as baseline JPEG (alpha flattened onto white).
    pub fn to_jpeg(&self, quality: u8) -> ImageResult<Vec<u8>> {
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(&self.to_rgb())?;
        Ok(buffer)
    }
}
