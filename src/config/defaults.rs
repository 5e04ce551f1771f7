/// Default size budget in bytes (10 MiB)
pub const DEFAULT_BUDGET_BYTES: u64 = 10 * 1024 * 1024;

/// Largest width or height an image rendition may have, in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 4096;

/// JPEG qualities tried at full size, best first
pub const IMAGE_QUALITY_LADDER: &[u8] = &[85, 70, 55, 40, 30];

/// Downscale ladder in percent of the original size: start, exclusive floor, step
pub const DOWNSCALE_START_PCT: u32 = 90;
pub const DOWNSCALE_FLOOR_PCT: u32 = 30;
pub const DOWNSCALE_STEP_PCT: u32 = 10;

/// Quality held while downscaling
pub const DOWNSCALE_QUALITY: u8 = 40;

/// Image last resort
pub const IMAGE_LAST_RESORT_SCALE: f32 = 0.3;
pub const IMAGE_LAST_RESORT_QUALITY: u8 = 30;

/// JPEG qualities tried for rasterized PDF pages, best first
pub const PDF_QUALITY_LADDER: &[u8] = &[70, 50, 35, 20];

/// Page render scale (1.5x keeps body text legible)
pub const DEFAULT_PDF_SCALE: f32 = 1.5;

/// PDF last resort
pub const PDF_LAST_RESORT_SCALE: f32 = 1.0;
pub const PDF_LAST_RESORT_QUALITY: u8 = 15;
