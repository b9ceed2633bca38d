//! Multi-scale sliding-window search.
//!
//! Enumerates a geometric pyramid of window sizes between `min_size` and
//! `max_size`, sliding each window over the image on an integer stride
//! grid and collecting every window the classifier scores above zero.
//!
//! Each scale keeps a margin of `scale / 2 + 1` pixels to the image
//! border. The classifier samples at most `scale / 2` pixels away from the
//! window centre, so the margin keeps every pixel address in range without
//! per-sample checks.
//!
//! With the `parallel` feature the scales are classified on the rayon
//! thread pool; per-scale results are concatenated in pyramid order, so
//! the output is identical to the serial path.

use crate::cascade::Cascade;
use crate::classify::classify_window;
use crate::image::ImageU8;
use crate::types::Detection;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sliding-window search parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Smallest window side length in pixels.
    pub min_size: u32,
    /// Largest window side length in pixels.
    pub max_size: u32,
    /// Multiplier between consecutive pyramid scales (> 1.0).
    pub scale_factor: f32,
    /// Window shift as a fraction of the current scale (> 0.0).
    pub stride_factor: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            min_size: 20,
            max_size: 1000,
            scale_factor: 1.1,
            stride_factor: 0.1,
        }
    }
}

/// Rejected scan preconditions.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanParamsError {
    /// Image has a zero dimension or a buffer too small for its extent.
    EmptyImage { width: usize, height: usize },
    /// `min_size` is zero or exceeds `max_size`.
    InvalidSizeRange { min_size: u32, max_size: u32 },
    /// `scale_factor` must be strictly greater than 1.
    InvalidScaleFactor(f32),
    /// `stride_factor` must be strictly positive.
    InvalidStrideFactor(f32),
}

impl std::fmt::Display for ScanParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanParamsError::EmptyImage { width, height } => {
                write!(f, "empty or undersized image buffer ({width}x{height})")
            }
            ScanParamsError::InvalidSizeRange { min_size, max_size } => {
                write!(f, "invalid window size range [{min_size}, {max_size}]")
            }
            ScanParamsError::InvalidScaleFactor(v) => {
                write!(f, "scale factor must be > 1.0, got {v}")
            }
            ScanParamsError::InvalidStrideFactor(v) => {
                write!(f, "stride factor must be > 0.0, got {v}")
            }
        }
    }
}

impl std::error::Error for ScanParamsError {}

impl ScanParams {
    fn validate(&self, image: &ImageU8<'_>) -> Result<(), ScanParamsError> {
        if image.is_degenerate() {
            return Err(ScanParamsError::EmptyImage {
                width: image.w,
                height: image.h,
            });
        }
        if self.min_size < 1 || self.max_size < self.min_size {
            return Err(ScanParamsError::InvalidSizeRange {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        if self.scale_factor <= 1.0 {
            return Err(ScanParamsError::InvalidScaleFactor(self.scale_factor));
        }
        if self.stride_factor <= 0.0 {
            return Err(ScanParamsError::InvalidStrideFactor(self.stride_factor));
        }
        Ok(())
    }
}

/// Scan the image at every pyramid scale, collecting positive windows.
///
/// Detections come out in raster order within each scale, scales in
/// increasing order.
pub fn scan_image(
    cascade: &Cascade,
    image: ImageU8<'_>,
    params: &ScanParams,
) -> Result<Vec<Detection>, ScanParamsError> {
    params.validate(&image)?;

    let scales = scale_pyramid(params);
    debug!(
        "scan start w={} h={} scales={} range=[{}, {}]",
        image.w,
        image.h,
        scales.len(),
        params.min_size,
        params.max_size
    );

    let detections = collect_scales(cascade, &image, &scales, params.stride_factor);

    debug!("scan done detections={}", detections.len());
    Ok(detections)
}

/// Window side lengths visited by the scan, smallest first.
fn scale_pyramid(params: &ScanParams) -> Vec<f32> {
    let mut scales = Vec::new();
    let mut scale = params.min_size as f32;
    while scale <= params.max_size as f32 {
        scales.push(scale);
        scale *= params.scale_factor;
    }
    scales
}

#[cfg(not(feature = "parallel"))]
fn collect_scales(
    cascade: &Cascade,
    image: &ImageU8<'_>,
    scales: &[f32],
    stride_factor: f32,
) -> Vec<Detection> {
    let mut detections = Vec::new();
    for &scale in scales {
        detections.extend(scan_scale(cascade, image, scale, stride_factor));
    }
    detections
}

#[cfg(feature = "parallel")]
fn collect_scales(
    cascade: &Cascade,
    image: &ImageU8<'_>,
    scales: &[f32],
    stride_factor: f32,
) -> Vec<Detection> {
    // Ordered collect keeps the per-scale blocks in pyramid order, so the
    // output matches the serial path exactly.
    let per_scale: Vec<Vec<Detection>> = scales
        .par_iter()
        .map(|&scale| scan_scale(cascade, image, scale, stride_factor))
        .collect();
    per_scale.into_iter().flatten().collect()
}

/// Classify every window of one scale over the stride grid.
fn scan_scale(
    cascade: &Cascade,
    image: &ImageU8<'_>,
    scale: f32,
    stride_factor: f32,
) -> Vec<Detection> {
    let s = scale as i32;
    let step = ((stride_factor * scale).round() as i32).max(1);
    let margin = s / 2 + 1;
    let max_row = image.h as i32 - margin;
    let max_col = image.w as i32 - margin;

    let mut hits = Vec::new();
    let mut row = margin;
    while row <= max_row {
        let mut col = margin;
        while col <= max_col {
            let q = classify_window(cascade, image, row, col, s);
            if q > 0.0 {
                // The record keeps the fractional pyramid scale; only the
                // classifier and the grid work on the truncated side.
                hits.push(Detection {
                    row,
                    col,
                    scale,
                    score: q,
                });
            }
            col += step;
        }
        row += step;
    }
    hits
}
