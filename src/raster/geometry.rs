//! Pixel dimension arithmetic for renditions

/// Scale `width`x`height` by `scale`, rounding to whole pixels, then clamp
/// both sides to `max_dimension` while keeping the aspect ratio.
pub fn target_dimensions(width: u32, height: u32, scale: f32, max_dimension: u32) -> (u32, u32) {
    let factor = scale as f64;
    fit_within(
        scale_side(width, factor),
        scale_side(height, factor),
        max_dimension,
    )
}

/// Proportionally shrink so neither side exceeds `max_dimension`
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }
    let max = max_dimension as f64;
    let factor = (max / width as f64).min(max / height as f64);
    (
        scale_side(width, factor).min(max_dimension),
        scale_side(height, factor).min(max_dimension),
    )
}

fn scale_side(side: u32, factor: f64) -> u32 {
    ((side as f64 * factor).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity_within_limit() {
        assert_eq!(target_dimensions(1200, 800, 1.0, 4096), (1200, 800));
    }

    #[test]
    fn test_scale_rounds() {
        assert_eq!(target_dimensions(1001, 501, 0.5, 4096), (501, 251));
        assert_eq!(target_dimensions(3, 3, 0.1, 4096), (1, 1));
    }

    #[test]
    fn test_clamp_landscape() {
        assert_eq!(target_dimensions(8000, 6000, 1.0, 4096), (4096, 3072));
    }

    #[test]
    fn test_clamp_portrait() {
        assert_eq!(fit_within(3000, 9000, 4096), (1365, 4096));
    }

    #[test]
    fn test_clamp_applies_after_scale() {
        // 0.9 * 8000 = 7200, still over the limit
        assert_eq!(target_dimensions(8000, 6000, 0.9, 4096), (4096, 3072));
        // 0.3 * 8000 = 2400, under the limit
        assert_eq!(target_dimensions(8000, 6000, 0.3, 4096), (2400, 1800));
    }

    proptest! {
        #[test]
        fn never_exceeds_max(w in 1u32..20_000, h in 1u32..20_000, max in 1u32..5_000) {
            let (tw, th) = fit_within(w, h, max);
            prop_assert!(tw <= max && th <= max);
            prop_assert!(tw >= 1 && th >= 1);
        }

        #[test]
        fn preserves_aspect_ratio(w in 1u32..20_000, h in 1u32..20_000, max in 64u32..5_000) {
            let (tw, th) = fit_within(w, h, max);
            let skew = (tw as i64 * h as i64 - th as i64 * w as i64).unsigned_abs();
            prop_assert!(skew <= (w + h) as u64, "{}x{} -> {}x{}", w, h, tw, th);
        }

        #[test]
        fn untouched_when_small(w in 1u32..4096, h in 1u32..4096) {
            prop_assert_eq!(fit_within(w, h, 4096), (w, h));
        }
    }
}
