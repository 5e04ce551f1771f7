use std::fmt;

use super::ladder::Quality;
use super::media::{MediaType, SourceFile};
use super::plan::{Attempt, Phase};

/// Which step of the plan produced an output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Input already fit the budget and was returned as-is
    Unchanged,
    Quality(Quality),
    Downscaled { scale: f32, quality: Quality },
    LastResort { scale: f32, quality: Quality },
}

impl From<&Attempt> for Strategy {
    fn from(attempt: &Attempt) -> Self {
        match attempt.phase {
            Phase::Quality => Strategy::Quality(attempt.quality),
            Phase::Downscale => Strategy::Downscaled {
                scale: attempt.scale,
                quality: attempt.quality,
            },
            Phase::LastResort => Strategy::LastResort {
                scale: attempt.scale,
                quality: attempt.quality,
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Unchanged => write!(f, "unchanged"),
            Strategy::Quality(q) => write!(f, "quality {}", q),
            Strategy::Downscaled { scale, quality } => write!(
                f,
                "downscaled to {:.0}% at quality {}",
                scale * 100.0,
                quality
            ),
            Strategy::LastResort { scale, quality } => write!(
                f,
                "last resort, {:.0}% at quality {}",
                scale * 100.0,
                quality
            ),
        }
    }
}

/// Result of a compression call
#[derive(Debug, Clone)]
pub struct CompressedOutput {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
    /// Logical name carried over from the source
    pub file_name: String,
    pub strategy: Strategy,
    /// Number of encodes performed
    pub attempts: usize,
}

impl CompressedOutput {
    /// Pass the source through without re-encoding
    pub fn unchanged(source: &SourceFile) -> Self {
        Self {
            bytes: source.bytes().to_vec(),
            media_type: source.media_type(),
            file_name: source.name().to_string(),
            strategy: Strategy::Unchanged,
            attempts: 0,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
