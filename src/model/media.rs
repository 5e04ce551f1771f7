use std::path::Path;

use image::ImageFormat;

use crate::error::CompressError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Declared media type of a source or output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Gif,
    Bmp,
    Tiff,
    /// Any other raster format the decoder understands
    OtherImage,
    Pdf,
}

impl MediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
            MediaType::Bmp => "image/bmp",
            MediaType::Tiff => "image/tiff",
            MediaType::OtherImage => "application/octet-stream",
            MediaType::Pdf => "application/pdf",
        }
    }

    /// Preferred file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "jpg",
            MediaType::Png => "png",
            MediaType::Webp => "webp",
            MediaType::Gif => "gif",
            MediaType::Bmp => "bmp",
            MediaType::Tiff => "tiff",
            MediaType::OtherImage => "img",
            MediaType::Pdf => "pdf",
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, MediaType::Pdf)
    }

    /// Identify the media type from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            return Some(MediaType::Pdf);
        }
        image::guess_format(bytes).ok().map(Self::from_image_format)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "webp" => Some(MediaType::Webp),
            "gif" => Some(MediaType::Gif),
            "bmp" => Some(MediaType::Bmp),
            "tif" | "tiff" => Some(MediaType::Tiff),
            _ => None,
        }
    }

    fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => MediaType::Jpeg,
            ImageFormat::Png => MediaType::Png,
            ImageFormat::WebP => MediaType::Webp,
            ImageFormat::Gif => MediaType::Gif,
            ImageFormat::Bmp => MediaType::Bmp,
            ImageFormat::Tiff => MediaType::Tiff,
            _ => MediaType::OtherImage,
        }
    }
}

/// An immutable file handed to the compressor
#[derive(Debug, Clone)]
pub struct SourceFile {
    bytes: Vec<u8>,
    media_type: MediaType,
    name: String,
}

impl SourceFile {
    pub fn new(bytes: Vec<u8>, media_type: MediaType, name: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type,
            name: name.into(),
        }
    }

    /// Build a source file, sniffing its media type from content first and
    /// falling back to the extension of `name`.
    pub fn detect(bytes: Vec<u8>, name: impl Into<String>) -> Result<Self, CompressError> {
        let name = name.into();
        let media_type = MediaType::sniff(&bytes)
            .or_else(|| {
                Path::new(&name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(MediaType::from_extension)
            })
            .ok_or_else(|| {
                CompressError::Decode(format!("{}: unrecognized media type", name))
            })?;
        Ok(Self::new(bytes, media_type, name))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
