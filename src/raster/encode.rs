//! Lossy encoding with a lossless fallback

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageResult, RgbImage};

use crate::error::CompressError;
use crate::model::{MediaType, Quality};

/// Encoded rendition and the format the encoder actually produced
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl Encoded {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Encode a frame as JPEG, retrying as PNG when the JPEG encoder refuses it.
pub fn encode_frame(frame: &DynamicImage, quality: Quality) -> Result<Encoded, CompressError> {
    match encode_jpeg(&frame.to_rgb8(), quality) {
        Ok(bytes) => Ok(Encoded {
            bytes,
            media_type: MediaType::Jpeg,
        }),
        Err(jpeg_err) => {
            log::warn!(
                "JPEG encoding of {}x{} frame failed ({}), retrying as PNG",
                frame.width(),
                frame.height(),
                jpeg_err
            );
            let bytes = encode_png(frame).map_err(|png_err| {
                CompressError::Encode(format!("JPEG: {}; PNG fallback: {}", jpeg_err, png_err))
            })?;
            Ok(Encoded {
                bytes,
                media_type: MediaType::Png,
            })
        }
    }
}

pub fn encode_jpeg(rgb: &RgbImage, quality: Quality) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.percent());
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

pub fn encode_png(frame: &DynamicImage) -> ImageResult<Vec<u8>> {
    let rgba = frame.to_rgba8();
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_jpeg_output() {
        let encoded = encode_frame(&gradient(64, 48), Quality(80)).unwrap();
        assert_eq!(encoded.media_type, MediaType::Jpeg);
        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let frame = gradient(256, 256);
        let high = encode_frame(&frame, Quality(90)).unwrap();
        let low = encode_frame(&frame, Quality(20)).unwrap();
        assert!(low.size() < high.size());
    }

    #[test]
    fn test_png_fallback_when_jpeg_rejects_frame() {
        // JPEG headers cannot describe a side longer than 65535 pixels
        let frame = DynamicImage::ImageRgb8(RgbImage::new(70_000, 1));
        let encoded = encode_frame(&frame, Quality(80)).unwrap();
        assert_eq!(encoded.media_type, MediaType::Png);
        assert!(encoded.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_alpha_is_flattened_for_jpeg() {
        let frame = DynamicImage::new_rgba8(32, 32);
        let encoded = encode_frame(&frame, Quality(70)).unwrap();
        assert_eq!(encoded.media_type, MediaType::Jpeg);
    }
}
