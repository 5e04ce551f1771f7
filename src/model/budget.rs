use std::fmt;

use crate::error::ConfigError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Maximum number of bytes a compressed output may occupy.
///
/// Always positive. Compression returns the first rendition that `fits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeBudget(u64);

impl SizeBudget {
    pub fn new(bytes: u64) -> Result<Self, ConfigError> {
        if bytes == 0 {
            return Err(ConfigError::InvalidBudget(
                "budget must be at least one byte".to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Budget expressed in mebibytes
    pub fn mebibytes(mib: u64) -> Result<Self, ConfigError> {
        Self::new(mib.saturating_mul(MIB))
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Check whether an output of `len` bytes stays within the budget
    pub fn fits(&self, len: u64) -> bool {
        len <= self.0
    }
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self(crate::config::defaults::DEFAULT_BUDGET_BYTES)
    }
}

impl fmt::Display for SizeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HumanBytes(self.0))
    }
}

/// Byte count rendered with a binary unit suffix (e.g. `10.0 MiB`)
pub struct HumanBytes(pub u64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        let (value, unit) = if bytes >= GIB {
            (bytes as f64 / GIB as f64, "GiB")
        } else if bytes >= MIB {
            (bytes as f64 / MIB as f64, "MiB")
        } else if bytes >= KIB {
            (bytes as f64 / KIB as f64, "KiB")
        } else {
            return write!(f, "{} B", bytes);
        };
        write!(f, "{:.1} {}", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_rejected() {
        assert!(matches!(
            SizeBudget::new(0),
            Err(ConfigError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_fits_is_inclusive() {
        let budget = SizeBudget::new(100).unwrap();
        assert!(budget.fits(99));
        assert!(budget.fits(100));
        assert!(!budget.fits(101));
    }

    #[test]
    fn test_default_is_ten_mebibytes() {
        assert_eq!(SizeBudget::default().bytes(), 10 * 1024 * 1024);
        assert_eq!(SizeBudget::default(), SizeBudget::mebibytes(10).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(SizeBudget::new(512).unwrap().to_string(), "512 B");
        assert_eq!(SizeBudget::new(1536).unwrap().to_string(), "1.5 KiB");
        assert_eq!(SizeBudget::default().to_string(), "10.0 MiB");
    }
}
