//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Compute output dimensions for a source image under optional target bounds.
///
/// The source dimensions must already account for orientation (pass the
/// upright width/height, see
/// [`Orientation::oriented_dimensions`](super::Orientation::oriented_dimensions)).
///
/// Rules:
/// - A source strictly under ANY set bound is returned unchanged — this
///   function never upscales.
/// - With both bounds set, the binding constraint is whichever bound the
///   source's aspect ratio hits first: width binds when
///   `w/h >= target_w/target_h`, height otherwise.
/// - With one bound set, it binds when smaller than the source dimension.
/// - The derived dimension rounds UP so the output surface never
///   under-allocates.
///
/// # Arguments
/// * `source` - Upright source dimensions (width, height), both ≥ 1
/// * `target_width` / `target_height` - Optional bounds, ≥ 1 when set
///
/// # Returns
/// * `(width, height)` - Output dimensions; positive, never above the source
///
/// # Examples
/// ```
/// # use shrinkray::imaging::plan_dimensions;
/// // Width-only bound: 3000x4000 fit to width 750 → 750x1000
/// assert_eq!(plan_dimensions((3000, 4000), Some(750), None), (750, 1000));
///
/// // Source already inside the bound: unchanged
/// assert_eq!(plan_dimensions((600, 400), Some(750), None), (600, 400));
/// ```
pub fn plan_dimensions(
    source: (u32, u32),
    target_width: Option<u32>,
    target_height: Option<u32>,
) -> (u32, u32) {
    let (mut width, mut height) = source;

    // Under either set bound → keep the source as-is.
    let under_width = target_width.is_some_and(|tw| width < tw);
    let under_height = target_height.is_some_and(|th| height < th);
    if under_width || under_height {
        return (width, height);
    }

    let scale = width as f64 / height as f64;

    match (target_width, target_height) {
        (Some(tw), Some(th)) => {
            if scale >= tw as f64 / th as f64 {
                if width > tw {
                    width = tw;
                    height = (tw as f64 / scale).ceil() as u32;
                }
            } else if height > th {
                height = th;
                width = (th as f64 * scale).ceil() as u32;
            }
        }
        (Some(tw), None) => {
            if tw < width {
                width = tw;
                height = (tw as f64 / scale).ceil() as u32;
            }
        }
        (None, Some(th)) => {
            if th < height {
                height = th;
                width = (th as f64 * scale).ceil() as u32;
            }
        }
        (None, None) => {}
    }

    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // =========================================================================
    // Width-only bound
    // =========================================================================

    #[test]
    fn width_bound_scales_height_up_rounded() {
        // The §8 reference shot: 4000x3000 with tag 6 → upright 3000x4000,
        // width 750 → scale 0.75 → height ceil(750/0.75) = 1000
        assert_eq!(plan_dimensions((3000, 4000), Some(750), None), (750, 1000));
    }

    #[test]
    fn width_bound_derived_height_uses_ceil() {
        // 1000x333: scale = 3.003..., width 100 → height ceil(33.3) = 34
        assert_eq!(plan_dimensions((1000, 333), Some(100), None), (100, 34));
    }

    #[test]
    fn source_under_width_bound_is_unchanged() {
        assert_eq!(plan_dimensions((600, 400), Some(750), None), (600, 400));
    }

    #[test]
    fn source_equal_to_width_bound_is_unchanged() {
        // Not strictly under the bound, and not above it either
        assert_eq!(plan_dimensions((750, 500), Some(750), None), (750, 500));
    }

    // =========================================================================
    // Height-only bound
    // =========================================================================

    #[test]
    fn height_bound_scales_width() {
        // 4000x2000, height 500 → width ceil(500 * 2) = 1000
        assert_eq!(plan_dimensions((4000, 2000), None, Some(500)), (1000, 500));
    }

    #[test]
    fn source_under_height_bound_is_unchanged() {
        assert_eq!(plan_dimensions((800, 300), None, Some(400)), (800, 300));
    }

    // =========================================================================
    // Both bounds — binding constraint selection
    // =========================================================================

    #[test]
    fn wide_source_binds_on_width() {
        // 1600x900 (1.78) into 800x600 (1.33): width binds → 800 x ceil(450)
        assert_eq!(
            plan_dimensions((1600, 900), Some(800), Some(600)),
            (800, 450)
        );
    }

    #[test]
    fn tall_source_binds_on_height() {
        // 900x1600 (0.56) into 800x600 (1.33): height binds → ceil(337.5) x 600
        assert_eq!(
            plan_dimensions((900, 1600), Some(800), Some(600)),
            (338, 600)
        );
    }

    #[test]
    fn matching_aspect_hits_both_bounds() {
        assert_eq!(
            plan_dimensions((1600, 1200), Some(800), Some(600)),
            (800, 600)
        );
    }

    #[test]
    fn under_one_of_two_bounds_keeps_source() {
        // Height 500 is under the 600 bound, so the source is kept even
        // though the width exceeds its bound.
        assert_eq!(
            plan_dimensions((1000, 500), Some(750), Some(600)),
            (1000, 500)
        );
    }

    // =========================================================================
    // No bounds
    // =========================================================================

    #[test]
    fn no_bounds_returns_source() {
        assert_eq!(plan_dimensions((4000, 3000), None, None), (4000, 3000));
        assert_eq!(plan_dimensions((1, 1), None, None), (1, 1));
    }

    // =========================================================================
    // Aspect preservation
    // =========================================================================

    #[test]
    fn single_bound_preserves_aspect_within_rounding() {
        for (src, tw) in [((3000, 2000), 900), ((1234, 877), 400), ((5000, 333), 1000)] {
            let (w, h) = plan_dimensions(src, Some(tw), None);
            let source_aspect = src.0 as f64 / src.1 as f64;
            let out_aspect = w as f64 / h as f64;
            // Derived dimension is within one pixel of exact, so the ratio
            // error is bounded by one unit of rounding on the height.
            let exact_h = tw as f64 / source_aspect;
            assert!((h as f64 - exact_h).abs() < 1.0, "{src:?} → {w}x{h}");
            assert!(out_aspect <= source_aspect, "ceil never widens the ratio");
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    proptest! {
        #[test]
        fn never_upscales_and_stays_positive(
            w in 1u32..6000,
            h in 1u32..6000,
            tw in proptest::option::of(1u32..6000),
            th in proptest::option::of(1u32..6000),
        ) {
            let (ow, oh) = plan_dimensions((w, h), tw, th);
            prop_assert!(ow >= 1);
            prop_assert!(oh >= 1);
            prop_assert!(ow <= w);
            prop_assert!(oh <= h);
        }

        #[test]
        fn planning_is_idempotent(
            w in 1u32..6000,
            h in 1u32..6000,
            tw in proptest::option::of(1u32..6000),
            th in proptest::option::of(1u32..6000),
        ) {
            let first = plan_dimensions((w, h), tw, th);
            prop_assert_eq!(plan_dimensions(first, tw, th), first);
        }
    }
}
