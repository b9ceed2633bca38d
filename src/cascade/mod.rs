//! Binary cascade file decoder.
//!
//! A cascade file stores a pre-trained forest of complete binary decision
//! trees. All multi-byte values are little-endian; floats are IEEE-754
//! single precision. Layout:
//!
//! - bytes `[0, 8)`: legacy header (version + bounding box), skipped;
//! - bytes `[8, 12)`: tree depth as `i32`;
//! - bytes `[12, 16)`: tree count as `i32`;
//! - per tree: `(2^depth - 1)` quadruplets of signed byte offsets
//!   (`dy0, dx0, dy1, dx1`, binary-heap order starting at node 1), then
//!   `2^depth` `f32` leaf predictions, then one `f32` stage threshold.
//!
//! The decoder prepends one zeroed quadruplet per tree so that node `idx`
//! starts at element `4 * idx` of the tree block and the children of `idx`
//! are `2 * idx` and `2 * idx + 1`. Node index 0 is never addressed by
//! traversal.

use std::fs;
use std::path::Path;

/// Header bytes preceding the tree data (legacy fields + depth + count).
const HEADER_LEN: usize = 16;

/// Upper bound on the tree depth; keeps `1 << depth` far away from
/// overflow and rejects garbage headers early.
pub const MAX_TREE_DEPTH: i32 = 20;

/// Upper bound on the number of trees accepted from a file.
pub const MAX_TREE_COUNT: i32 = 1 << 20;

/// Failure modes of [`Cascade::from_bytes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CascadeError {
    /// The buffer ends before the header-declared data does.
    Truncated { expected: usize, actual: usize },
    /// Tree depth outside `1..=MAX_TREE_DEPTH`.
    InvalidDepth(i32),
    /// Tree count outside `1..=MAX_TREE_COUNT`.
    InvalidTreeCount(i32),
    /// The file could not be read at all.
    Io(String),
}

impl std::fmt::Display for CascadeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CascadeError::Truncated { expected, actual } => write!(
                f,
                "cascade buffer truncated: expected at least {expected} bytes, got {actual}"
            ),
            CascadeError::InvalidDepth(depth) => write!(
                f,
                "invalid tree depth {depth} (expected 1..={MAX_TREE_DEPTH})"
            ),
            CascadeError::InvalidTreeCount(count) => write!(
                f,
                "invalid tree count {count} (expected 1..={MAX_TREE_COUNT})"
            ),
            CascadeError::Io(msg) => write!(f, "failed to read cascade file: {msg}"),
        }
    }
}

impl std::error::Error for CascadeError {}

/// An immutable decision-tree forest decoded from a cascade file.
///
/// Per tree, `tree_codes` holds `2^depth` signed-byte quadruplets (slot 0
/// is the unused placeholder), `predictions` holds `2^depth` leaf values
/// and `thresholds` one cumulative rejection threshold.
#[derive(Clone, Debug)]
pub struct Cascade {
    pub tree_depth: usize,
    pub tree_count: usize,
    pub tree_codes: Vec<i8>,
    pub predictions: Vec<f32>,
    pub thresholds: Vec<f32>,
}

impl Cascade {
    /// Decode a cascade from an in-memory byte buffer.
    ///
    /// Trailing bytes beyond the declared tree data are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CascadeError> {
        if bytes.len() < HEADER_LEN {
            return Err(CascadeError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let depth = read_i32(bytes, 8);
        if !(1..=MAX_TREE_DEPTH).contains(&depth) {
            return Err(CascadeError::InvalidDepth(depth));
        }
        let count = read_i32(bytes, 12);
        if !(1..=MAX_TREE_COUNT).contains(&count) {
            return Err(CascadeError::InvalidTreeCount(count));
        }

        let tree_depth = depth as usize;
        let tree_count = count as usize;
        let leaf_count = 1usize << tree_depth;

        // Per tree: (2^depth - 1) code quadruplets + 2^depth leaf floats
        // + one threshold float.
        let tree_bytes = (leaf_count - 1) * 4 + leaf_count * 4 + 4;
        let expected = HEADER_LEN + tree_count * tree_bytes;
        if bytes.len() < expected {
            return Err(CascadeError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let mut tree_codes = Vec::with_capacity(tree_count * leaf_count * 4);
        let mut predictions = Vec::with_capacity(tree_count * leaf_count);
        let mut thresholds = Vec::with_capacity(tree_count);

        let mut p = HEADER_LEN;
        for _ in 0..tree_count {
            // Placeholder quadruplet for the unused node index 0.
            tree_codes.extend_from_slice(&[0i8; 4]);
            let code_len = (leaf_count - 1) * 4;
            tree_codes.extend(bytes[p..p + code_len].iter().map(|&b| b as i8));
            p += code_len;

            for _ in 0..leaf_count {
                predictions.push(read_f32(bytes, p));
                p += 4;
            }

            thresholds.push(read_f32(bytes, p));
            p += 4;
        }

        Ok(Self {
            tree_depth,
            tree_count,
            tree_codes,
            predictions,
            thresholds,
        })
    }

    /// Read and decode a cascade file from disk.
    pub fn from_file(path: &Path) -> Result<Self, CascadeError> {
        let bytes = fs::read(path)
            .map_err(|e| CascadeError::Io(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// Number of leaves per tree (`2^depth`).
    #[inline]
    pub fn leaf_count(&self) -> usize {
        1 << self.tree_depth
    }
}

#[inline]
fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
