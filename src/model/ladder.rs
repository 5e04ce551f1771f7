//! Quality and scale ladders
//!
//! Both ladders are tried strictly from the least to the most destructive
//! entry, so construction rejects anything that is not strictly descending.

use std::fmt;

use crate::error::ConfigError;

/// Lossy encoder quality on the encoder's native percentage scale (1-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(pub(crate) u8);

impl Quality {
    pub fn new(percent: u8) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&percent) {
            return Err(ConfigError::InvalidLadder(format!(
                "quality {} is outside 1-100",
                percent
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descending sequence of lossy qualities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLadder(pub(crate) Vec<Quality>);

impl QualityLadder {
    pub fn new(percents: &[u8]) -> Result<Self, ConfigError> {
        if percents.is_empty() {
            return Err(ConfigError::InvalidLadder(
                "quality ladder is empty".to_string(),
            ));
        }
        let qualities = percents
            .iter()
            .map(|&p| Quality::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        if qualities.windows(2).any(|pair| pair[1] >= pair[0]) {
            return Err(ConfigError::InvalidLadder(format!(
                "quality ladder {:?} is not strictly descending",
                percents
            )));
        }
        Ok(Self(qualities))
    }

    pub fn iter(&self) -> impl Iterator<Item = Quality> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Descending sequence of geometric scale factors in (0, 1]
///
/// Factors are kept in whole hundredths so that stepping from 0.9 down to a
/// 0.3 floor yields exactly 0.9, 0.8, 0.7, 0.6, 0.5, 0.4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleLadder(pub(crate) Vec<u32>);

impl ScaleLadder {
    /// Build `start, start - step, ...` while the factor stays above `floor`.
    pub fn stepped(start: f32, floor: f32, step: f32) -> Result<Self, ConfigError> {
        let start_h = to_hundredths(start)?;
        let floor_h = (floor * 100.0).round();
        let step_h = (step * 100.0).round();
        if !(floor_h >= 0.0) || !(step_h >= 1.0) {
            return Err(ConfigError::InvalidLadder(format!(
                "scale ladder floor {} / step {} are invalid",
                floor, step
            )));
        }
        let ladder = Self::stepped_percent(start_h, floor_h as u32, step_h as u32);
        if ladder.is_empty() {
            return Err(ConfigError::InvalidLadder(format!(
                "scale ladder from {} never rises above floor {}",
                start, floor
            )));
        }
        Ok(ladder)
    }

    /// Same as `stepped` with every argument in whole percent; `step` > 0.
    pub(crate) fn stepped_percent(start: u32, floor: u32, step: u32) -> Self {
        Self(
            std::iter::successors(Some(start), |&s| s.checked_sub(step))
                .take_while(|&s| s > floor)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().map(|&h| h as f32 / 100.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn to_hundredths(factor: f32) -> Result<u32, ConfigError> {
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(ConfigError::InvalidScale(factor));
    }
    let hundredths = (factor * 100.0).round() as u32;
    if hundredths == 0 {
        return Err(ConfigError::InvalidScale(factor));
    }
    Ok(hundredths)
}
