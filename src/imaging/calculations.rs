//! Pure calculation functions for output dimensions and strip layout.
//!
//! All functions here are pure and testable without any I/O or images.

use std::ops::Range;

/// Calculate output dimensions that cover a target box at the source aspect ratio.
///
/// The longer source axis is fitted to the box first, then each axis that
/// still falls short is re-expanded. Both corrections run in sequence, so if
/// they ever disagree the height correction wins.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height)
/// * `target` - Requested bounding box (width, height), both positive
///
/// # Returns
/// * `(width, height)` - At least as large as `target` on both axes
///
/// # Examples
/// ```
/// # use stripfit::imaging::calculate_cover_dimensions;
/// // 2:1 landscape into a square box: height is the constraint
/// assert_eq!(calculate_cover_dimensions((1000, 500), (300, 300)), (600, 300));
///
/// // 1:2 portrait into a square box: width is the constraint
/// assert_eq!(calculate_cover_dimensions((400, 800), (200, 200)), (200, 400));
/// ```
pub fn calculate_cover_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let ratio = src_w as f64 / src_h as f64;
    let height_for = |w: u32| (w as f64 / ratio).round() as u32;
    let width_for = |h: u32| (h as f64 * ratio).round() as u32;

    let (mut out_w, mut out_h) = if ratio > 1.0 {
        (tgt_w, height_for(tgt_w))
    } else {
        (width_for(tgt_h), tgt_h)
    };

    if out_w < tgt_w {
        out_w = tgt_w;
        out_h = height_for(tgt_w);
    }
    if out_h < tgt_h {
        out_h = tgt_h;
        out_w = width_for(tgt_h);
    }

    (out_w, out_h)
}

/// Clamp a requested strip count to the rows available on both sides.
///
/// Every strip reads at least one source row. Capping at `out_height` too
/// keeps the number of strips that plan to an empty output band small.
pub fn effective_strip_count(src_height: u32, out_height: u32, requested: usize) -> u32 {
    let requested = u32::try_from(requested).unwrap_or(u32::MAX);
    requested.clamp(1, src_height.min(out_height).max(1))
}

/// Split `[0, src_height)` into `strips` contiguous row ranges.
///
/// Every range but the last has `src_height / strips` rows; the last one
/// absorbs the remainder. Callers clamp `strips` with
/// [`effective_strip_count`] first, otherwise leading ranges can be empty.
pub fn partition_rows(src_height: u32, strips: u32) -> Vec<Range<u32>> {
    let strips = strips.max(1);
    let strip_height = src_height / strips;

    (0..strips)
        .map(|i| {
            let start = i * strip_height;
            let end = if i == strips - 1 {
                src_height
            } else {
                start + strip_height
            };
            start..end
        })
        .collect()
}

/// Output height of a strip scaled independently of its neighbours.
///
/// `round(rows / src_height * out_height)`. Summed over all strips this can
/// miss `out_height` by a pixel or more; [`plan_strips`] rounds strip
/// boundaries instead.
pub fn strip_output_height(rows: u32, src_height: u32, out_height: u32) -> u32 {
    (rows as f64 * out_height as f64 / src_height as f64).round() as u32
}

/// A source row range together with the height it is resampled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripPlan {
    /// Position of the strip, top to bottom.
    pub index: usize,
    /// Source rows `[start, end)`.
    pub rows: Range<u32>,
    /// Height of the resampled strip.
    pub out_height: u32,
}

/// Attach output heights to a row partition.
///
/// Each source boundary row `r` maps to output row `round(r / src_height *
/// out_height)`, and a strip's height is the distance between its two mapped
/// boundaries. Rounding is monotone, so no height is negative, and a
/// partition ending at `src_height` ends at `out_height`: the heights sum to
/// `out_height` exactly for any strip count. A strip whose boundaries round
/// to the same row plans to height 0 and is skipped by the resampler.
pub fn plan_strips(rows: &[Range<u32>], src_height: u32, out_height: u32) -> Vec<StripPlan> {
    let boundary = |row: u32| {
        if src_height == 0 {
            0
        } else {
            strip_output_height(row, src_height, out_height)
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, range)| StripPlan {
            index,
            rows: range.clone(),
            out_height: boundary(range.end).saturating_sub(boundary(range.start)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // =========================================================================
    // calculate_cover_dimensions tests
    // =========================================================================

    #[test]
    fn cover_landscape_into_square_expands_width() {
        // 2:1 → landscape branch gives 300x150, height falls short → 600x300
        assert_eq!(calculate_cover_dimensions((1000, 500), (300, 300)), (600, 300));
    }

    #[test]
    fn cover_portrait_into_square_expands_height() {
        // 1:2 → portrait branch gives 100x200, width falls short → 200x400
        assert_eq!(calculate_cover_dimensions((400, 800), (200, 200)), (200, 400));
    }

    #[test]
    fn cover_square_source_square_box() {
        assert_eq!(calculate_cover_dimensions((640, 640), (100, 100)), (100, 100));
    }

    #[test]
    fn cover_same_aspect_is_exact() {
        assert_eq!(calculate_cover_dimensions((800, 600), (400, 300)), (400, 300));
    }

    #[test]
    fn cover_landscape_into_wide_box_needs_no_correction() {
        // 4:3 into 400x100: width fits first, height 300 already covers
        assert_eq!(calculate_cover_dimensions((800, 600), (400, 100)), (400, 300));
    }

    #[test]
    fn cover_upscales_small_source() {
        assert_eq!(calculate_cover_dimensions((10, 5), (100, 100)), (200, 100));
    }

    #[test]
    fn cover_rounds_half_away_from_zero() {
        // 3:2 into 5x1 → height 5/1.5 = 3.33 → 3
        assert_eq!(calculate_cover_dimensions((3, 2), (5, 1)), (5, 3));
        // 2:3 into 1x3 → width 3*0.667 = 2.0 → 2
        assert_eq!(calculate_cover_dimensions((2, 3), (1, 3)), (2, 3));
        // 1:2 into 1x1 → width 0.5 rounds up to 1
        assert_eq!(calculate_cover_dimensions((1, 2), (1, 1)), (1, 1));
    }

    #[test]
    fn cover_extreme_landscape_one_pixel_box() {
        // First pass rounds height to 0, height correction restores it
        assert_eq!(calculate_cover_dimensions((10_000, 1), (1, 1)), (10_000, 1));
    }

    #[test]
    fn cover_extreme_portrait_one_pixel_box() {
        assert_eq!(calculate_cover_dimensions((1, 10_000), (1, 1)), (1, 10_000));
    }

    proptest! {
        #[test]
        fn prop_cover_never_undershoots(
            src_w in 1u32..5_000,
            src_h in 1u32..5_000,
            tgt_w in 1u32..5_000,
            tgt_h in 1u32..5_000,
        ) {
            let (w, h) = calculate_cover_dimensions((src_w, src_h), (tgt_w, tgt_h));
            prop_assert!(w >= tgt_w, "width {} < target {}", w, tgt_w);
            prop_assert!(h >= tgt_h, "height {} < target {}", h, tgt_h);
        }

        #[test]
        fn prop_cover_keeps_aspect_within_a_pixel(
            src_w in 1u32..5_000,
            src_h in 1u32..5_000,
            tgt_w in 1u32..5_000,
            tgt_h in 1u32..5_000,
        ) {
            let ratio = src_w as f64 / src_h as f64;
            let (w, h) = calculate_cover_dimensions((src_w, src_h), (tgt_w, tgt_h));
            let width_err = (w as f64 - h as f64 * ratio).abs();
            let height_err = (h as f64 - w as f64 / ratio).abs();
            // One axis is exact, the other was derived by rounding
            prop_assert!(
                width_err <= 0.5 + 1e-9 || height_err <= 0.5 + 1e-9,
                "{}x{} drifts from ratio {}", w, h, ratio
            );
        }
    }

    // =========================================================================
    // effective_strip_count / partition_rows tests
    // =========================================================================

    #[test]
    fn strip_count_clamped_to_rows() {
        assert_eq!(effective_strip_count(3, 100, 8), 3);
        assert_eq!(effective_strip_count(100, 100, 8), 8);
    }

    #[test]
    fn strip_count_clamped_to_output_rows() {
        assert_eq!(effective_strip_count(1000, 10, 16), 10);
        assert_eq!(effective_strip_count(1000, 2, 4), 2);
    }

    #[test]
    fn strip_count_at_least_one() {
        assert_eq!(effective_strip_count(100, 100, 0), 1);
        assert_eq!(effective_strip_count(0, 0, 4), 1);
    }

    #[test]
    fn partition_even_split() {
        assert_eq!(partition_rows(100, 4), vec![0..25, 25..50, 50..75, 75..100]);
    }

    #[test]
    fn partition_last_strip_absorbs_remainder() {
        assert_eq!(partition_rows(10, 3), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn partition_single_strip_covers_everything() {
        assert_eq!(partition_rows(37, 1), vec![0..37]);
    }

    #[test]
    fn partition_unclamped_degenerate_has_empty_leading_strips() {
        // What the clamp in effective_strip_count protects against
        assert_eq!(partition_rows(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    }

    proptest! {
        #[test]
        fn prop_partition_tiles_exactly(src_height in 1u32..10_000, n in 1u32..64) {
            prop_assume!(src_height >= n);
            let ranges = partition_rows(src_height, n);
            prop_assert_eq!(ranges.len(), n as usize);
            prop_assert_eq!(ranges[0].start, 0);
            prop_assert_eq!(ranges[ranges.len() - 1].end, src_height);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for range in &ranges {
                prop_assert!(range.start < range.end, "empty range {:?}", range);
            }
        }
    }

    // =========================================================================
    // strip_output_height / plan_strips tests
    // =========================================================================

    #[test]
    fn strip_height_is_proportional() {
        assert_eq!(strip_output_height(250, 1000, 300), 75);
        assert_eq!(strip_output_height(1, 3, 4), 1); // 1.33 → 1
    }

    #[test]
    fn independent_rounding_drifts_below_target() {
        // Three one-row strips scaled to 4 rows: 1.33 each rounds to 1
        let total: u32 = partition_rows(3, 3)
            .iter()
            .map(|r| strip_output_height(r.end - r.start, 3, 4))
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn independent_rounding_drifts_above_target() {
        // Three one-row strips scaled to 5 rows: 1.67 each rounds to 2
        let total: u32 = partition_rows(3, 3)
            .iter()
            .map(|r| strip_output_height(r.end - r.start, 3, 5))
            .sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn plan_rounds_boundaries_not_heights() {
        // Boundaries 0, 1.33, 2.67, 4 → 0, 1, 3, 4
        let plan = plan_strips(&partition_rows(3, 3), 3, 4);
        let heights: Vec<u32> = plan.iter().map(|p| p.out_height).collect();
        assert_eq!(heights, vec![1, 2, 1]);

        // Boundaries 0, 1.67, 3.33, 5 → 0, 2, 3, 5
        let plan = plan_strips(&partition_rows(3, 3), 3, 5);
        let heights: Vec<u32> = plan.iter().map(|p| p.out_height).collect();
        assert_eq!(heights, vec![2, 1, 2]);
    }

    #[test]
    fn plan_keeps_indices_and_rows() {
        let plan = plan_strips(&partition_rows(10, 3), 10, 20);
        assert_eq!(plan[0], StripPlan { index: 0, rows: 0..3, out_height: 6 });
        assert_eq!(plan[1], StripPlan { index: 1, rows: 3..6, out_height: 6 });
        assert_eq!(plan[2], StripPlan { index: 2, rows: 6..10, out_height: 8 });
    }

    #[test]
    fn plan_with_more_strips_than_output_rows_still_fills_output() {
        // Four one-row strips into 2 rows: boundaries 0, 1, 1, 2, 2
        let plan = plan_strips(&partition_rows(4, 4), 4, 2);
        let heights: Vec<u32> = plan.iter().map(|p| p.out_height).collect();
        assert_eq!(heights, vec![1, 0, 1, 0]);

        // Unclamped count: 64 strips of a 1000-row source into 100 rows
        let plan = plan_strips(&partition_rows(1000, 64), 1000, 100);
        assert_eq!(plan.iter().map(|p| p.out_height).sum::<u32>(), 100);
        assert!(plan[63].out_height > 0, "bottom strip lost: {:?}", plan[63]);
    }

    #[test]
    fn plan_bottom_strip_reaches_last_output_row() {
        let plan = plan_strips(&partition_rows(16, 16), 16, 10);
        let offset: u32 = plan[..15].iter().map(|p| p.out_height).sum();
        assert_eq!(offset + plan[15].out_height, 10);
        assert_eq!(plan[15].out_height, 1);
    }

    #[test]
    fn plan_empty_partition() {
        assert!(plan_strips(&[], 10, 10).is_empty());
    }

    proptest! {
        #[test]
        fn prop_plan_sums_to_output_height(
            src_height in 1u32..4_000,
            out_height in 1u32..4_000,
            n in 1usize..128,
        ) {
            let strips = effective_strip_count(src_height, out_height, n);
            let plan = plan_strips(&partition_rows(src_height, strips), src_height, out_height);
            let total: u32 = plan.iter().map(|p| p.out_height).sum();
            prop_assert_eq!(total, out_height);
        }

        #[test]
        fn prop_unclamped_plan_sums_to_output_height(
            src_height in 1u32..4_000,
            out_height in 1u32..4_000,
            n in 1u32..256,
        ) {
            prop_assume!(src_height >= n);
            let plan = plan_strips(&partition_rows(src_height, n), src_height, out_height);
            let total: u32 = plan.iter().map(|p| p.out_height).sum();
            prop_assert_eq!(total, out_height);
        }
    }
}
