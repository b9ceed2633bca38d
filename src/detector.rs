//! High-level detector driving scan, clustering and quality gating.
//!
//! [`PicoDetector`] wraps a decoded [`Cascade`] with the parameters of a
//! full run: feed a grayscale image and get the clustered detections that
//! cleared the quality threshold, together with counts and stage timings.
//!
//! ```no_run
//! use pico_detector::{Cascade, DetectParams, PicoDetector};
//! use pico_detector::image::ImageU8;
//!
//! # fn example(cascade: Cascade, gray: ImageU8) -> Result<(), Box<dyn std::error::Error>> {
//! let detector = PicoDetector::new(cascade, DetectParams::default());
//! let report = detector.process(gray)?;
//! println!("{} detections in {:.3} ms", report.detections.len(), report.latency_ms);
//! # Ok(())
//! # }
//! ```

use crate::cascade::Cascade;
use crate::cluster::cluster_detections;
use crate::image::ImageU8;
use crate::scan::{scan_image, ScanParams, ScanParamsError};
use crate::types::ClusteredDetection;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters of a full detection run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    /// Sliding-window search parameters.
    pub scan: ScanParams,
    /// Overlap above which raw detections merge into one cluster.
    pub iou_threshold: f32,
    /// Clusters with a summed score at or below this value are dropped.
    pub quality_threshold: f32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            scan: ScanParams::default(),
            iou_threshold: 0.2,
            quality_threshold: 10.0,
        }
    }
}

/// Outcome of one detector run.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionReport {
    /// Clusters that cleared the quality threshold.
    pub detections: Vec<ClusteredDetection>,
    /// Positive windows emitted by the scan.
    pub raw_count: usize,
    /// Clusters before quality gating.
    pub cluster_count: usize,
    pub scan_ms: f64,
    pub cluster_ms: f64,
    pub latency_ms: f64,
}

/// Cascade plus run parameters; immutable and safe to share across threads.
pub struct PicoDetector {
    cascade: Cascade,
    params: DetectParams,
}

impl PicoDetector {
    pub fn new(cascade: Cascade, params: DetectParams) -> Self {
        Self { cascade, params }
    }

    pub fn params(&self) -> &DetectParams {
        &self.params
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Run scan → cluster → quality gate on a grayscale image.
    pub fn process(&self, gray: ImageU8<'_>) -> Result<DetectionReport, ScanParamsError> {
        let t0 = Instant::now();

        let scan_start = Instant::now();
        let raw = scan_image(&self.cascade, gray, &self.params.scan)?;
        let scan_ms = scan_start.elapsed().as_secs_f64() * 1000.0;
        let raw_count = raw.len();

        let cluster_start = Instant::now();
        let clusters = cluster_detections(raw, self.params.iou_threshold);
        let cluster_ms = cluster_start.elapsed().as_secs_f64() * 1000.0;
        let cluster_count = clusters.len();

        let detections: Vec<ClusteredDetection> = clusters
            .into_iter()
            .filter(|c| c.score > self.params.quality_threshold)
            .collect();

        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "process done raw={} clusters={} kept={} latency_ms={:.3}",
            raw_count,
            cluster_count,
            detections.len(),
            latency_ms
        );

        Ok(DetectionReport {
            detections,
            raw_count,
            cluster_count,
            scan_ms,
            cluster_ms,
            latency_ms,
        })
    }
}
