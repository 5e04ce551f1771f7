use std::fmt;
use std::io::Cursor;

use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use log::{debug, info, warn};

use crate::cancel::{ensure_active, Cancellable};
use crate::config::Settings;
use crate::error::CompressError;
use crate::model::{Attempt, CompressedOutput, Phase, Plan, SourceFile, Strategy};

use super::encode::{encode_frame, Encoded};
use super::geometry::target_dimensions;

/// Every attempt the image compressor may make, in order.
///
/// Quality ladder at full size, then the downscale ladder at a fixed
/// quality, then the last resort.
pub fn image_plan(settings: &Settings) -> Plan {
    let quality_phase = settings.image_qualities.iter().map(|quality| Attempt {
        phase: Phase::Quality,
        scale: 1.0,
        quality,
    });
    let downscale_phase = settings.downscale.iter().map(|scale| Attempt {
        phase: Phase::Downscale,
        scale,
        quality: settings.downscale_quality,
    });
    Plan {
        ladder: quality_phase.chain(downscale_phase).collect(),
        last_resort: Attempt {
            phase: Phase::LastResort,
            scale: settings.last_resort_scale,
            quality: settings.last_resort_quality,
        },
    }
}

/// Re-encode an image until it fits `settings.budget`.
///
/// Returns the source untouched when it already fits. Otherwise the first
/// attempt of [`image_plan`] that fits wins; the last resort is returned
/// even when it is still over budget.
pub fn compress_image(
    source: &SourceFile,
    settings: &Settings,
    cancel: &dyn Cancellable,
) -> Result<CompressedOutput, CompressError> {
    let budget = settings.budget;
    if budget.fits(source.size()) {
        debug!("{} ({} bytes) already within {}", source.name(), source.size(), budget);
        return Ok(CompressedOutput::unchanged(source));
    }

    ensure_active(cancel)?;
    let decoded = decode_upright(source)?;
    debug!("Decoded {} at {}x{}", source.name(), decoded.width(), decoded.height());

    let plan = image_plan(settings);
    let mut session = Session {
        source,
        settings,
        decoded: &decoded,
        cache: None,
        total: plan.len(),
    };

    for (index, attempt) in plan.ladder.iter().enumerate() {
        ensure_active(cancel)?;
        let encoded = session.encode(attempt, index + 1)?;
        if budget.fits(encoded.size()) {
            return Ok(session.finish(encoded, attempt, index + 1));
        }
    }

    ensure_active(cancel)?;
    let encoded = session.encode(&plan.last_resort, plan.len())?;
    if !budget.fits(encoded.size()) {
        warn!(
            "{}: last resort is {} bytes, still over {}",
            source.name(),
            encoded.size(),
            budget
        );
    }
    Ok(session.finish(encoded, &plan.last_resort, plan.len()))
}

/// Decode with the EXIF orientation applied, so the pixels come out the way
/// a viewer displays them. Re-encoding drops the tag.
fn decode_upright(source: &SourceFile) -> Result<DynamicImage, CompressError> {
    let mut decoder = ImageReader::new(Cursor::new(source.bytes()))
        .with_guessed_format()
        .map_err(|e| decode_error(source, e))?
        .into_decoder()
        .map_err(|e| decode_error(source, e))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(source, e))?;
    if orientation != Orientation::NoTransforms {
        debug!("{}: applying EXIF orientation {:?}", source.name(), orientation);
        image.apply_orientation(orientation);
    }
    Ok(image)
}

fn decode_error(source: &SourceFile, e: impl fmt::Display) -> CompressError {
    CompressError::Decode(format!("{}: {}", source.name(), e))
}

/// State shared by the attempts of one call
struct Session<'a> {
    source: &'a SourceFile,
    settings: &'a Settings,
    decoded: &'a DynamicImage,
    cache: Option<((u32, u32), DynamicImage)>,
    total: usize,
}

impl Session<'_> {
    fn encode(&mut self, attempt: &Attempt, number: usize) -> Result<Encoded, CompressError> {
        let (width, height) = (self.decoded.width(), self.decoded.height());
        let dims = target_dimensions(width, height, attempt.scale, self.settings.max_dimension);
        let frame = frame_at(self.decoded, dims, &mut self.cache);
        let encoded = encode_frame(frame, attempt.quality)?;

        debug!(
            "{}: attempt {}/{} {:?} scale {:.2} quality {} -> {}x{}, {} bytes (budget {})",
            self.source.name(),
            number,
            self.total,
            attempt.phase,
            attempt.scale,
            attempt.quality,
            dims.0,
            dims.1,
            encoded.size(),
            self.settings.budget.bytes()
        );
        Ok(encoded)
    }

    fn finish(&self, encoded: Encoded, attempt: &Attempt, attempts: usize) -> CompressedOutput {
        let strategy = Strategy::from(attempt);
        info!(
            "{}: {} -> {} bytes ({})",
            self.source.name(),
            self.source.size(),
            encoded.size(),
            strategy
        );
        CompressedOutput {
            bytes: encoded.bytes,
            media_type: encoded.media_type,
            file_name: self.source.name().to_string(),
            strategy,
            attempts,
        }
    }
}

/// Frame at `dims`, reusing the previous resize when the size repeats
fn frame_at<'a>(
    decoded: &'a DynamicImage,
    dims: (u32, u32),
    cache: &'a mut Option<((u32, u32), DynamicImage)>,
) -> &'a DynamicImage {
    if (decoded.width(), decoded.height()) == dims {
        return decoded;
    }
    if !matches!(cache, Some((cached, _)) if *cached == dims) {
        *cache = None;
    }
    &cache
        .get_or_insert_with(|| (dims, decoded.resize_exact(dims.0, dims.1, FilterType::Lanczos3)))
        .1
}
