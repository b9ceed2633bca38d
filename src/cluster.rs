//! Greedy clustering of overlapping raw detections.
//!
//! Non-maximum suppression by intersection-over-union: detections are
//! sorted by score (highest first) and each still-unassigned detection
//! seeds a cluster that absorbs every later detection overlapping it
//! sufficiently. Instead of discarding the absorbed members, the cluster
//! reports their mean position/scale and their summed score.

use crate::types::{ClusteredDetection, Detection};

/// Intersection over union of two square windows (centre + side length).
///
/// The union term is the approximation `s1^2 + s2^2 - overlap`, not the
/// textbook union. Published cascades and their clustering thresholds were
/// tuned against this form, so it stays as-is.
pub fn calculate_iou(a: &Detection, b: &Detection) -> f32 {
    let (ar, ac, ah) = (a.row as f32, a.col as f32, a.scale / 2.0);
    let (br, bc, bh) = (b.row as f32, b.col as f32, b.scale / 2.0);

    let over_r = 0f32.max((ar + ah).min(br + bh) - (ar - ah).max(br - bh));
    let over_c = 0f32.max((ac + ah).min(bc + bh) - (ac - ah).max(bc - bh));
    let overlap = over_r * over_c;

    overlap / (a.scale * a.scale + b.scale * b.scale - overlap)
}

/// Merge overlapping detections into averaged cluster representatives.
///
/// The forward scan does not skip detections already claimed by an earlier
/// cluster: a detection overlapping two seeds contributes to both,
/// double-counting its score. Inherited behavior, kept as-is; changing it
/// would alter output on transitively-overlapping chains of detections.
pub fn cluster_detections(
    mut detections: Vec<Detection>,
    iou_threshold: f32,
) -> Vec<ClusteredDetection> {
    // Stable sort keeps scan order for equal scores, so the result is
    // deterministic regardless of how ties arrived.
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut assigned = vec![false; detections.len()];
    let mut clusters = Vec::new();

    for i in 0..detections.len() {
        if assigned[i] {
            continue;
        }

        let mut row = 0.0f32;
        let mut col = 0.0f32;
        let mut scale = 0.0f32;
        let mut score = 0.0f32;
        let mut n = 0usize;

        for j in i..detections.len() {
            if calculate_iou(&detections[i], &detections[j]) > iou_threshold {
                assigned[j] = true;
                row += detections[j].row as f32;
                col += detections[j].col as f32;
                scale += detections[j].scale;
                score += detections[j].score;
                n += 1;
            }
        }

        clusters.push(ClusteredDetection {
            row: row / n as f32,
            col: col / n as f32,
            scale: scale / n as f32,
            score,
        });
    }

    clusters
}
