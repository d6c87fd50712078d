//! Channel normalization and tensor layout for the embedding model.
//!
//! The embedding model consumes a channel-major (CHW) float tensor of fixed
//! shape 3x224x224, standardized with the ImageNet statistics it was trained
//! against. Normalization and the HWC-to-CHW permutation are exposed
//! separately so the permutation can be tested as an exact bijection.

use crate::raster::{RasterImage, RGB_CHANNELS};
use crate::util::{FpMatchError, FpMatchResult};

/// Channel count of the model input tensor.
pub const CHANNELS: usize = 3;
/// Model input width in pixels.
pub const TARGET_WIDTH: u32 = 224;
/// Model input height in pixels.
pub const TARGET_HEIGHT: u32 = 224;

/// Per-channel mean the upstream model was trained against (ImageNet, RGB).
pub const CHANNEL_MEAN: [f32; CHANNELS] = [0.485, 0.456, 0.406];
/// Per-channel standard deviation matching [`CHANNEL_MEAN`].
pub const CHANNEL_STD: [f32; CHANNELS] = [0.229, 0.224, 0.225];

/// Standardizes RGB bytes into pixel-major, channel-interleaved floats.
///
/// Each channel value maps to `(p / 255 - mean[c]) / std[c]`. The output is
/// not clamped; values may be negative or exceed 1.0.
pub fn normalize(img: &RasterImage) -> FpMatchResult<Vec<f32>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut out = Vec::new();
    out.try_reserve_exact(width * height * RGB_CHANNELS)
        .map_err(|_| FpMatchError::AllocationFailure)?;

    for y in 0..img.height() {
        let row = img.row(y).ok_or(FpMatchError::BufferTooSmall {
            needed: (y as usize + 1) * img.row_stride() as usize,
            got: img.pixels().len(),
        })?;
        for pixel in row.chunks_exact(RGB_CHANNELS) {
            for (c, &value) in pixel.iter().enumerate() {
                out.push((f32::from(value) / 255.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c]);
            }
        }
    }

    Ok(out)
}

/// Permutes pixel-major (HWC) floats into channel-major (CHW) order.
///
/// For all valid `(c, y, x)`:
/// `chw[c*h*w + y*w + x] == hwc[y*w*channels + x*channels + c]`.
pub fn to_channel_major(
    pixel_major: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> FpMatchResult<Vec<f32>> {
    let len = check_layout_len(pixel_major, width, height, channels)?;
    let mut out = vec![0.0f32; len];
    let plane = width * height;

    for y in 0..height {
        for x in 0..width {
            let src_base = (y * width + x) * channels;
            for c in 0..channels {
                out[c * plane + y * width + x] = pixel_major[src_base + c];
            }
        }
    }

    Ok(out)
}

/// Inverse of [`to_channel_major`]: CHW floats back into HWC order.
pub fn to_pixel_major(
    channel_major: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> FpMatchResult<Vec<f32>> {
    let len = check_layout_len(channel_major, width, height, channels)?;
    let mut out = vec![0.0f32; len];
    let plane = width * height;

    for y in 0..height {
        for x in 0..width {
            let dst_base = (y * width + x) * channels;
            for c in 0..channels {
                out[dst_base + c] = channel_major[c * plane + y * width + x];
            }
        }
    }

    Ok(out)
}

fn check_layout_len(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> FpMatchResult<usize> {
    let len = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(FpMatchError::AllocationFailure)?;
    if data.len() != len {
        return Err(FpMatchError::BufferTooSmall {
            needed: len,
            got: data.len(),
        });
    }
    Ok(len)
}

/// Channel-major standardized tensor of fixed shape 3x224x224.
pub struct NormalizedTensor {
    data: Vec<f32>,
}

impl NormalizedTensor {
    /// Builds the model input tensor from an image already at the target size.
    pub fn from_image(img: &RasterImage) -> FpMatchResult<Self> {
        if img.width() != TARGET_WIDTH || img.height() != TARGET_HEIGHT {
            return Err(FpMatchError::InvalidDimensions {
                width: i64::from(img.width()),
                height: i64::from(img.height()),
            });
        }
        let pixel_major = normalize(img)?;
        let data = to_channel_major(
            &pixel_major,
            TARGET_WIDTH as usize,
            TARGET_HEIGHT as usize,
            CHANNELS,
        )?;
        Ok(Self { data })
    }

    /// Returns the channel-major values, length `3 * 224 * 224`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the value at `(channel, y, x)` if it is within bounds.
    pub fn get(&self, channel: usize, y: usize, x: usize) -> Option<f32> {
        if channel >= CHANNELS || y >= TARGET_HEIGHT as usize || x >= TARGET_WIDTH as usize {
            return None;
        }
        let plane = TARGET_WIDTH as usize * TARGET_HEIGHT as usize;
        self.data
            .get(channel * plane + y * TARGET_WIDTH as usize + x)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{to_channel_major, to_pixel_major, CHANNEL_MEAN, CHANNEL_STD};

    #[test]
    fn layout_permutation_matches_index_formula() {
        let width = 3;
        let height = 2;
        let channels = 3;
        let hwc: Vec<f32> = (0..width * height * channels).map(|i| i as f32).collect();
        let chw = to_channel_major(&hwc, width, height, channels).unwrap();

        for c in 0..channels {
            for y in 0..height {
                for x in 0..width {
                    assert_eq!(
                        chw[c * height * width + y * width + x],
                        hwc[y * width * channels + x * channels + c],
                    );
                }
            }
        }

        let back = to_pixel_major(&chw, width, height, channels).unwrap();
        assert_eq!(back, hwc);
    }

    #[test]
    fn normalization_constants_are_imagenet() {
        assert_eq!(CHANNEL_MEAN, [0.485, 0.456, 0.406]);
        assert_eq!(CHANNEL_STD, [0.229, 0.224, 0.225]);
    }
}
