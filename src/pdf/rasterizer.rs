use image::RgbImage;

use crate::error::CompressError;

/// One page rendered at a given scale
///
/// Consumed by [`super::DocumentBuilder::add_page`] as soon as it is produced.
#[derive(Debug)]
pub struct RenderedPage {
    /// Page width in points, already multiplied by the render scale
    pub width_pt: f32,
    /// Page height in points, already multiplied by the render scale
    pub height_pt: f32,
    pub raster: RgbImage,
}

/// Opens PDF bytes for page rendering
pub trait Rasterizer {
    /// Fails with `CompressError::Decode` when the bytes are not a usable PDF
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>, CompressError>;
}

/// An opened document
pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Render page `index` (zero-based) at `scale` times its size in points.
    ///
    /// Fails with `Decode` when the page cannot be retrieved and with
    /// `Render` when rasterization itself fails.
    fn render_page(&self, index: usize, scale: f32) -> Result<RenderedPage, CompressError>;
}

/// Stand-in used when no rendering backend is compiled in or PDFium fails to bind
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRasterizer;

impl Rasterizer for NoRasterizer {
    fn open<'a>(&'a self, _bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>, CompressError> {
        Err(CompressError::Render(
            "no PDF rasterizer available (PDFium library missing or `pdfium` feature disabled)".to_string(),
        ))
    }
}
