//! Owned RGB raster buffers and the constrained bitmap decoder.
//!
//! `RasterImage` is an owned interleaved-RGB buffer with an explicit byte
//! stride. The stride counts bytes between the starts of consecutive rows, so
//! a stride larger than `width * 3` represents padded rows (the decoder keeps
//! the container's 4-byte row alignment; the resampler emits tight rows).
//! Rows are always stored top-down: row 0 is the visually topmost row.

use crate::util::{FpMatchError, FpMatchResult};

pub mod decode;

pub use decode::decode;

/// Number of interleaved channels in a raster row.
pub const RGB_CHANNELS: usize = 3;

/// Owned interleaved-RGB image with an explicit row stride in bytes.
pub struct RasterImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    row_stride: u32,
}

impl RasterImage {
    /// Creates an image from an owned pixel buffer.
    ///
    /// The buffer must hold exactly `row_stride * height` bytes and the
    /// stride must cover at least `width * 3` bytes per row.
    pub fn from_vec(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        row_stride: u32,
    ) -> FpMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(FpMatchError::InvalidDimensions {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        let min_stride = (width as usize)
            .checked_mul(RGB_CHANNELS)
            .ok_or(FpMatchError::AllocationFailure)?;
        if (row_stride as usize) < min_stride {
            return Err(FpMatchError::BufferTooSmall {
                needed: min_stride,
                got: row_stride as usize,
            });
        }
        let needed = (row_stride as usize)
            .checked_mul(height as usize)
            .ok_or(FpMatchError::AllocationFailure)?;
        if pixels.len() != needed {
            return Err(FpMatchError::BufferTooSmall {
                needed,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            row_stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the row stride in bytes.
    pub fn row_stride(&self) -> u32 {
        self.row_stride
    }

    /// Returns the backing buffer including any row padding.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the RGB bytes of row `y` without padding (`width * 3` bytes).
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize).checked_mul(self.row_stride as usize)?;
        let end = start.checked_add(self.width as usize * RGB_CHANNELS)?;
        self.pixels.get(start..end)
    }

    /// Returns the RGB triple at `(x, y)` if it is within bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let base = x as usize * RGB_CHANNELS;
        Some([row[base], row[base + 1], row[base + 2]])
    }
}

/// Allocates a zeroed byte buffer, surfacing allocation failure as an error.
pub(crate) fn alloc_bytes(len: usize) -> FpMatchResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| FpMatchError::AllocationFailure)?;
    buf.resize(len, 0);
    Ok(buf)
}
