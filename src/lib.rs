pub mod cancel;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod model;
pub mod pdf;
pub mod raster;

pub use cancel::{Cancellable, CancellationToken};
pub use config::Settings;
pub use delivery::optimize_delivery_url;
pub use error::{CompressError, ConfigError};
pub use model::{CompressedOutput, MediaType, SizeBudget, SourceFile, Strategy};
pub use pdf::{compress_pdf, NoRasterizer, Rasterizer};
pub use raster::compress_image;

/// Compress any supported file to fit `settings.budget`.
///
/// This is the recommended entry point for library consumers. PDFs go
/// through `rasterizer`; every other media type is treated as a raster
/// image and `rasterizer` is not touched.
///
/// # Arguments
///
/// * `source` - The file to compress, with its declared media type
/// * `settings` - Budget, ladders and dimension clamp
/// * `rasterizer` - PDF page renderer (use [`NoRasterizer`] for images only)
/// * `cancel` - Checked between encodes; a cancelled call yields no output
///
/// # Returns
///
/// A rendition of the same kind (image or PDF) within the budget, or the
/// last-resort rendition when no ladder step fits.
///
/// # Example
///
/// ```no_run
/// use media_budget::{compress, CancellationToken, NoRasterizer, Settings, SizeBudget, SourceFile};
///
/// let bytes = std::fs::read("tower.png").unwrap();
/// let source = SourceFile::detect(bytes, "tower.png").unwrap();
/// let settings = Settings::default().with_budget(SizeBudget::mebibytes(2).unwrap());
///
/// let output = compress(&source, &settings, &NoRasterizer, &CancellationToken::new()).unwrap();
/// std::fs::write("tower.min.jpg", &output.bytes).unwrap();
/// ```
pub fn compress(
    source: &SourceFile,
    settings: &Settings,
    rasterizer: &dyn Rasterizer,
    cancel: &dyn Cancellable,
) -> Result<CompressedOutput, CompressError> {
    settings.validate()?;
    if source.media_type().is_pdf() {
        compress_pdf(source, settings, rasterizer, cancel)
    } else {
        compress_image(source, settings, cancel)
    }
}
