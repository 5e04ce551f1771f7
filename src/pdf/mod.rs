//! PDF size-budget compression
//!
//! Pages are rasterized and re-assembled as image-only documents, one JPEG
//! per page. Text, vector graphics and links in the source are not carried
//! over.

pub mod assemble;
pub mod compressor;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod rasterizer;

pub use assemble::DocumentBuilder;
pub use compressor::{compress_pdf, pdf_plan};
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;
pub use rasterizer::{NoRasterizer, RasterDocument, Rasterizer, RenderedPage};
