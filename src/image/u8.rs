/// Borrowed view over a row-major 8-bit grayscale buffer.
///
/// `stride` is the number of bytes between consecutive rows and may exceed
/// `w` for padded buffers. The detection hot path indexes `data` directly,
/// so the buffer must hold at least `stride * h` bytes.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Intensity at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.stride + col]
    }

    /// True when either dimension is zero or the buffer is too small to
    /// cover the declared extent.
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 || self.h == 0 || self.data.len() < self.stride * (self.h - 1) + self.w
    }
}
