use crate::cli::Args;
use crate::error::ConfigError;
use crate::model::{Quality, QualityLadder, ScaleLadder, SizeBudget};
use crate::pdf::pdf_plan;
use crate::raster::image_plan;

use super::defaults::*;

/// Runtime settings for a compression call
#[derive(Debug, Clone)]
pub struct Settings {
    pub budget: SizeBudget,
    /// Clamp for either side of an image rendition, in pixels
    pub max_dimension: u32,

    // Images
    pub image_qualities: QualityLadder,
    pub downscale: ScaleLadder,
    pub downscale_quality: Quality,
    pub last_resort_scale: f32,
    pub last_resort_quality: Quality,

    // PDFs
    pub pdf_qualities: QualityLadder,
    /// Page render scale for the quality ladder (may exceed 1.0)
    pub pdf_scale: f32,
    pub pdf_last_resort_scale: f32,
    pub pdf_last_resort_quality: Quality,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget: SizeBudget::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,

            image_qualities: QualityLadder(
                IMAGE_QUALITY_LADDER.iter().map(|&q| Quality(q)).collect(),
            ),
            downscale: ScaleLadder::stepped_percent(
                DOWNSCALE_START_PCT,
                DOWNSCALE_FLOOR_PCT,
                DOWNSCALE_STEP_PCT,
            ),
            downscale_quality: Quality(DOWNSCALE_QUALITY),
            last_resort_scale: IMAGE_LAST_RESORT_SCALE,
            last_resort_quality: Quality(IMAGE_LAST_RESORT_QUALITY),

            pdf_qualities: QualityLadder(PDF_QUALITY_LADDER.iter().map(|&q| Quality(q)).collect()),
            pdf_scale: DEFAULT_PDF_SCALE,
            pdf_last_resort_scale: PDF_LAST_RESORT_SCALE,
            pdf_last_resort_quality: Quality(PDF_LAST_RESORT_QUALITY),
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let settings = Self {
            budget: args.budget,
            max_dimension: args.max_dimension,
            pdf_scale: args.pdf_scale,
            // Never render the last resort larger than the ladder
            pdf_last_resort_scale: PDF_LAST_RESORT_SCALE.min(args.pdf_scale),
            ..Default::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_budget(mut self, budget: SizeBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Check the fields that are not guarded by their own constructors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dimension == 0 {
            return Err(ConfigError::InvalidDimension(self.max_dimension));
        }
        if !(self.last_resort_scale > 0.0 && self.last_resort_scale <= 1.0) {
            return Err(ConfigError::InvalidScale(self.last_resort_scale));
        }
        for scale in [self.pdf_scale, self.pdf_last_resort_scale] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::InvalidScale(scale));
            }
        }
        if !image_plan(self).is_monotone() {
            return Err(ConfigError::InvalidLadder(
                "image attempts must never get less aggressive".to_string(),
            ));
        }
        if !pdf_plan(self).is_monotone() {
            return Err(ConfigError::InvalidLadder(
                "PDF attempts must never get less aggressive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladders() {
        let settings = Settings::default();
        let qualities: Vec<u8> = settings.image_qualities.iter().map(|q| q.percent()).collect();
        assert_eq!(qualities, vec![85, 70, 55, 40, 30]);
        assert_eq!(settings.downscale.len(), 6);
        assert_eq!(settings.pdf_qualities.len(), 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_args_lowers_pdf_last_resort() {
        use clap::Parser;
        let args = Args::parse_from(["media-budget", "a.pdf", "--pdf-scale", "0.8"]);
        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.pdf_last_resort_scale, 0.8);
        assert_eq!(settings.pdf_scale, 0.8);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let settings = Settings::default().with_max_dimension(0);
        assert_eq!(settings.validate(), Err(ConfigError::InvalidDimension(0)));
    }

    #[test]
    fn test_last_resort_must_be_most_aggressive() {
        let settings = Settings {
            downscale: ScaleLadder::stepped(0.9, 0.1, 0.1).unwrap(),
            ..Default::default()
        };
        // Downscale reaches 0.2, below the 0.3 last resort
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidLadder(_))));
    }

    #[test]
    fn test_bad_pdf_scale_rejected() {
        let settings = Settings {
            pdf_scale: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidScale(_))));
    }
}
