//! Per-window staged classifier.
//!
//! Walks every tree of the cascade over one candidate window, accumulating
//! leaf predictions and rejecting early as soon as the running total drops
//! to a stage threshold or below. Most non-object windows die within the
//! first few trees, which is the dominant performance property of the
//! cascade.
//!
//! Pixel addressing is 256x fixed-point: window coordinates are promoted
//! with `<< 8`, per-node byte offsets are multiplied by the integer window
//! scale and the sum is brought back to pixel units with an arithmetic
//! `>> 8`. The sign-preserving shift (not floating-point division) defines
//! the scores bit-for-bit; rewriting it in floats diverges near fractional
//! boundaries.
//!
//! The evaluator performs no bounds checks of its own beyond slice
//! indexing: the scan margin (`scan` module) keeps every sampled address
//! inside the image. Calling it with a window closer to the border than
//! `scale / 2 + 1` pixels is a programming error.

use crate::cascade::Cascade;
use crate::image::ImageU8;

/// Score returned when a stage rejects the window.
pub const REJECTED: f32 = -1.0;

/// Classify one candidate window centred at `(row, col)` with side `scale`.
///
/// Returns [`REJECTED`] (`-1.0`) when any stage rejects; otherwise the
/// margin of the accumulated score above the final stage threshold.
pub fn classify_window(
    cascade: &Cascade,
    image: &ImageU8<'_>,
    row: i32,
    col: i32,
    scale: i32,
) -> f32 {
    let row_fix = row << 8;
    let col_fix = col << 8;
    let ldim = image.stride as i32;
    let pixels = image.data;

    let leaf_count = cascade.leaf_count();
    let mut root = 0usize;
    let mut o = 0.0f32;

    for t in 0..cascade.tree_count {
        let mut idx = 1usize;

        for _ in 0..cascade.tree_depth {
            let code = &cascade.tree_codes[root + 4 * idx..root + 4 * idx + 4];
            let p0 = ((row_fix + code[0] as i32 * scale) >> 8) * ldim
                + ((col_fix + code[1] as i32 * scale) >> 8);
            let p1 = ((row_fix + code[2] as i32 * scale) >> 8) * ldim
                + ((col_fix + code[3] as i32 * scale) >> 8);

            idx = 2 * idx + usize::from(pixels[p0 as usize] <= pixels[p1 as usize]);
        }

        // idx now lies in [2^depth, 2^(depth+1)); drop the high bit to get
        // the leaf slot within this tree's prediction block.
        o += cascade.predictions[t * leaf_count + idx - leaf_count];

        if o <= cascade.thresholds[t] {
            return REJECTED;
        }

        root += leaf_count * 4;
    }

    o - cascade.thresholds[cascade.tree_count - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_image(w: usize, h: usize, value: u8) -> Vec<u8> {
        vec![value; w * h]
    }

    fn view(data: &[u8], w: usize, h: usize) -> ImageU8<'_> {
        ImageU8 {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Forest with hand-written blocks; depth 1, one quadruplet per tree.
    fn forest(codes: Vec<i8>, predictions: Vec<f32>, thresholds: Vec<f32>) -> Cascade {
        Cascade {
            tree_depth: 1,
            tree_count: thresholds.len(),
            tree_codes: codes,
            predictions,
            thresholds,
        }
    }

    #[test]
    fn equal_samples_take_the_right_branch() {
        // Zero offsets compare a pixel with itself; <= holds, leaf 1 wins.
        let data = flat_image(32, 32, 100);
        let img = view(&data, 32, 32);
        let cascade = forest(
            vec![0, 0, 0, 0, 0, 0, 0, 0],
            vec![-3.0, 2.0],
            vec![0.5],
        );
        let q = classify_window(&cascade, &img, 16, 16, 8);
        assert_eq!(q, 2.0 - 0.5);
    }

    #[test]
    fn fixed_point_addressing_truncates_toward_neg_infinity() {
        // dx * scale = ±300 -> ±1.171875 px around col 10; the shift
        // floors, so the samples land on cols 8 and 11.
        let mut data = flat_image(32, 32, 50);
        data[16 * 32 + 8] = 200;
        data[16 * 32 + 11] = 100;
        let img = view(&data, 32, 32);
        let cascade = forest(
            vec![0, 0, 0, 0, 0, -1, 0, 1],
            vec![5.0, -5.0],
            vec![0.0],
        );
        // p0 (=200) > p1 (=100): branch bit 0, leaf 0.
        let q = classify_window(&cascade, &img, 16, 10, 300);
        assert_eq!(q, 5.0);
    }

    #[test]
    fn early_rejection_skips_remaining_trees() {
        // Tree 0 always lands on a losing leaf; tree 1 carries offsets that
        // would index far outside the 32x32 buffer (and panic) if sampled.
        let data = flat_image(32, 32, 100);
        let img = view(&data, 32, 32);
        let cascade = forest(
            vec![
                0, 0, 0, 0, 0, 0, 0, 0, // tree 0
                0, 0, 0, 0, 127, 127, 127, 127, // tree 1, out of range
            ],
            vec![-1.0, -1.0, 9.0, 9.0],
            vec![0.0, 0.0],
        );
        let q = classify_window(&cascade, &img, 16, 16, 200);
        assert_eq!(q, REJECTED);
    }

    #[test]
    fn full_survival_score_ignores_intermediate_thresholds() {
        let data = flat_image(32, 32, 100);
        let img = view(&data, 32, 32);
        // Three trees, each adds 2.0 via leaf 1; intermediate thresholds
        // differ but only the last one enters the final score.
        let cascade = forest(
            vec![0; 24],
            vec![0.0, 2.0, 0.0, 2.0, 0.0, 2.0],
            vec![-5.0, 1.0, 3.0],
        );
        let q = classify_window(&cascade, &img, 16, 16, 8);
        assert_eq!(q, 6.0 - 3.0);
    }
}
