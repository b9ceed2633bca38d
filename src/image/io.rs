//! I/O glue for grayscale images and JSON reports.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! None of this runs inside the detection hot path; images are decoded once
//! before scanning starts.
use super::ImageU8;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw row-major bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Decode an image file into the 8-bit grayscale buffer the scan expects.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let luma = image::open(path)
        .map_err(|e| format!("Failed to decode image {}: {e}", path.display()))?
        .into_luma8();
    Ok(GrayImageU8::new(
        luma.width() as usize,
        luma.height() as usize,
        luma.into_raw(),
    ))
}

/// Write a detection report (or any serializable value) as pretty JSON,
/// creating missing parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create report dir {}: {e}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize report {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write report {}: {e}", path.display()))
}
