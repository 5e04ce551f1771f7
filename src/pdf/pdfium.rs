//! PDFium-backed rasterizer
//!
//! PDFium keeps global state, so bind it once per process and keep the
//! rasterizer on the thread that created it.

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;

use crate::error::CompressError;

use super::rasterizer::{RasterDocument, Rasterizer, RenderedPage};

pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind to a PDFium library next to the executable, or the system one
    pub fn bind() -> Result<Self, CompressError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| CompressError::Render(format!("Failed to bind PDFium: {}", e)))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>, CompressError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| CompressError::Decode(format!("Failed to open PDF: {}", e)))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<RenderedPage, CompressError> {
        let page_index = index
            .try_into()
            .map_err(|_| CompressError::Decode(format!("Page index {} out of range", index)))?;
        let pages = self.document.pages();
        let page = pages
            .get(page_index)
            .map_err(|e| CompressError::Decode(format!("Failed to load page {}: {}", index + 1, e)))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| CompressError::Render(format!("Page {}: {}", index + 1, e)))?;

        let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            CompressError::Render(format!("Page {}: bitmap size mismatch", index + 1))
        })?;

        Ok(RenderedPage {
            width_pt: page.width().value * scale,
            height_pt: page.height().value * scale,
            raster: DynamicImage::ImageRgba8(rgba).into_rgb8(),
        })
    }
}
