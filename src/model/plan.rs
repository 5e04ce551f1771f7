//! Ordered compression attempts, computed before any encoding happens.

use super::ladder::Quality;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Quality reduction at the base scale
    Quality,
    /// Progressive downscale at a fixed quality
    Downscale,
    /// Final attempt, returned without a budget check
    LastResort,
}

/// One planned encode: a geometric scale and a lossy quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    pub phase: Phase,
    pub scale: f32,
    pub quality: Quality,
}

/// Budget-checked attempts followed by the unconditional last resort
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub ladder: Vec<Attempt>,
    pub last_resort: Attempt,
}

impl Plan {
    /// Total number of encodes the plan can make
    pub fn len(&self) -> usize {
        self.ladder.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attempt> {
        self.ladder.iter().chain(std::iter::once(&self.last_resort))
    }

    /// True when no attempt is less aggressive than the one before it
    pub fn is_monotone(&self) -> bool {
        let attempts: Vec<&Attempt> = self.iter().collect();
        attempts.windows(2).all(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            next.scale < prev.scale || (next.scale == prev.scale && next.quality <= prev.quality)
        })
    }
}
