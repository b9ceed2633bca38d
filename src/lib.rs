#![doc = include_str!("../README.md")]

pub mod cascade;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod detector;
pub mod image;
pub mod scan;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::cascade::{Cascade, CascadeError};
pub use crate::classify::classify_window;
pub use crate::cluster::{calculate_iou, cluster_detections};
pub use crate::detector::{DetectParams, DetectionReport, PicoDetector};
pub use crate::scan::{scan_image, ScanParams, ScanParamsError};
pub use crate::types::{ClusteredDetection, Detection};

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{Cascade, DetectParams, DetectionReport, PicoDetector, ScanParams};
}
