//! Detection data model shared by the scan and clustering stages.

use serde::Serialize;

/// A raw positive window emitted by the sliding-window scan.
///
/// `row`/`col` are the window centre in pixel coordinates, `scale` is the
/// fractional pyramid side length (the classifier samples on its integer
/// truncation, but clustering works on the fractional value) and `score`
/// the accumulated classifier margin.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Detection {
    pub row: i32,
    pub col: i32,
    pub scale: f32,
    pub score: f32,
}

/// A merged group of overlapping raw detections.
///
/// `row`, `col` and `scale` are the means over the members; `score` is the
/// member sum, preserving the total evidential weight of the cluster.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ClusteredDetection {
    pub row: f32,
    pub col: f32,
    pub scale: f32,
    pub score: f32,
}
