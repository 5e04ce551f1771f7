use log::{debug, info, warn};
use lopdf::Document;

use crate::cancel::{ensure_active, Cancellable};
use crate::config::Settings;
use crate::error::CompressError;
use crate::model::{Attempt, CompressedOutput, MediaType, Phase, Plan, SourceFile, Strategy};

use super::assemble::DocumentBuilder;
use super::rasterizer::{RasterDocument, Rasterizer};

/// Quality ladder at the configured render scale, then a lower-scale last
/// resort at the configured last-resort quality.
pub fn pdf_plan(settings: &Settings) -> Plan {
    Plan {
        ladder: settings
            .pdf_qualities
            .iter()
            .map(|quality| Attempt {
                phase: Phase::Quality,
                scale: settings.pdf_scale,
                quality,
            })
            .collect(),
        last_resort: Attempt {
            phase: Phase::LastResort,
            scale: settings.pdf_last_resort_scale,
            quality: settings.pdf_last_resort_quality,
        },
    }
}

/// Rebuild a PDF from rasterized pages until it fits `settings.budget`.
///
/// Every attempt renders all pages in order; a failure on any page aborts
/// the whole call. The last resort is returned without a budget check.
pub fn compress_pdf(
    source: &SourceFile,
    settings: &Settings,
    rasterizer: &dyn Rasterizer,
    cancel: &dyn Cancellable,
) -> Result<CompressedOutput, CompressError> {
    let budget = settings.budget;
    if budget.fits(source.size()) {
        debug!("{} ({} bytes) already within {}", source.name(), source.size(), budget);
        return Ok(CompressedOutput::unchanged(source));
    }

    ensure_active(cancel)?;
    // Reject malformed input up front, whichever backend does the rendering
    Document::load_mem(source.bytes()).map_err(|e| {
        CompressError::Decode(format!("{}: not a readable PDF: {}", source.name(), e))
    })?;
    let document = rasterizer.open(source.bytes())?;
    let page_count = document.page_count();
    if page_count == 0 {
        return Err(CompressError::Decode(format!("{}: PDF has no pages", source.name())));
    }
    debug!("Opened {} with {} pages", source.name(), page_count);

    let plan = pdf_plan(settings);
    let render = |attempt: &Attempt, number: usize| -> Result<Vec<u8>, CompressError> {
        let bytes = render_attempt(document.as_ref(), page_count, attempt, cancel)?;
        debug!(
            "{}: attempt {}/{} {:?} scale {:.2} quality {} -> {} bytes (budget {})",
            source.name(),
            number,
            plan.len(),
            attempt.phase,
            attempt.scale,
            attempt.quality,
            bytes.len(),
            budget.bytes()
        );
        Ok(bytes)
    };
    let finish = |bytes: Vec<u8>, attempt: &Attempt, attempts: usize| {
        let strategy = Strategy::from(attempt);
        info!(
            "{}: {} pages, {} -> {} bytes ({})",
            source.name(),
            page_count,
            source.size(),
            bytes.len(),
            strategy
        );
        CompressedOutput {
            bytes,
            media_type: MediaType::Pdf,
            file_name: source.name().to_string(),
            strategy,
            attempts,
        }
    };

    for (index, attempt) in plan.ladder.iter().enumerate() {
        let bytes = render(attempt, index + 1)?;
        if budget.fits(bytes.len() as u64) {
            return Ok(finish(bytes, attempt, index + 1));
        }
    }

    let bytes = render(&plan.last_resort, plan.len())?;
    if !budget.fits(bytes.len() as u64) {
        warn!(
            "{}: last resort is {} bytes, still over {}",
            source.name(),
            bytes.len(),
            budget
        );
    }
    Ok(finish(bytes, &plan.last_resort, plan.len()))
}

fn render_attempt(
    document: &dyn RasterDocument,
    page_count: usize,
    attempt: &Attempt,
    cancel: &dyn Cancellable,
) -> Result<Vec<u8>, CompressError> {
    let mut builder = DocumentBuilder::new();
    for index in 0..page_count {
        ensure_active(cancel)?;
        let page = document.render_page(index, attempt.scale)?;
        builder.add_page(page, attempt.quality)?;
    }
    builder.finish()
}
