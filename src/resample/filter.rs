//! Smoothing filters used around the bilinear resample.
//!
//! Both filters share the same edge policy: no wraparound and no mirroring.
//! A boundary pixel averages over the taps that actually fall inside the
//! image, so the effective kernel shrinks at the edges.

use crate::raster::RGB_CHANNELS;

/// Gaussian kernel diameter in pixels. Must stay odd.
pub(crate) const GAUSSIAN_KERNEL_SIZE: usize = 5;

/// Averages each pixel over its valid 3x3 neighborhood, per channel.
///
/// Integer arithmetic with rounded division keeps the result independent of
/// accumulation order.
pub(crate) fn box_filter_3x3(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut dst = vec![0u8; width * height * RGB_CHANNELS];

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0u32; RGB_CHANNELS];
            let mut count = 0u32;

            let y_lo = y.saturating_sub(1);
            let y_hi = (y + 1).min(height - 1);
            let x_lo = x.saturating_sub(1);
            let x_hi = (x + 1).min(width - 1);
            for ny in y_lo..=y_hi {
                for nx in x_lo..=x_hi {
                    let base = (ny * width + nx) * RGB_CHANNELS;
                    for c in 0..RGB_CHANNELS {
                        sums[c] += u32::from(src[base + c]);
                    }
                    count += 1;
                }
            }

            let base = (y * width + x) * RGB_CHANNELS;
            for c in 0..RGB_CHANNELS {
                dst[base + c] = ((sums[c] + count / 2) / count) as u8;
            }
        }
    }

    dst
}

/// Builds the 2D Gaussian tap weights for the fixed kernel size.
///
/// Weights are left unnormalized; callers renormalize over the taps that are
/// in bounds for each output pixel.
fn gaussian_weights() -> [[f32; GAUSSIAN_KERNEL_SIZE]; GAUSSIAN_KERNEL_SIZE] {
    let sigma = GAUSSIAN_KERNEL_SIZE as f32 / 6.0;
    let radius = (GAUSSIAN_KERNEL_SIZE / 2) as i64;
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);

    let mut weights = [[0.0f32; GAUSSIAN_KERNEL_SIZE]; GAUSSIAN_KERNEL_SIZE];
    for (ky, row) in weights.iter_mut().enumerate() {
        let dy = ky as i64 - radius;
        for (kx, w) in row.iter_mut().enumerate() {
            let dx = kx as i64 - radius;
            let dist_sq = (dx * dx + dy * dy) as f32;
            *w = (-dist_sq * inv_two_sigma_sq).exp();
        }
    }
    weights
}

/// Applies the fixed-size Gaussian kernel per channel.
///
/// Boundary pixels renormalize over their in-bounds taps so the weights used
/// always sum to 1.
pub(crate) fn gaussian_blur(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let weights = gaussian_weights();
    let radius = GAUSSIAN_KERNEL_SIZE / 2;
    let mut dst = vec![0u8; width * height * RGB_CHANNELS];

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; RGB_CHANNELS];
            let mut weight_sum = 0.0f32;

            for (ky, row) in weights.iter().enumerate() {
                let ny = y as i64 + ky as i64 - radius as i64;
                if ny < 0 || ny >= height as i64 {
                    continue;
                }
                for (kx, &w) in row.iter().enumerate() {
                    let nx = x as i64 + kx as i64 - radius as i64;
                    if nx < 0 || nx >= width as i64 {
                        continue;
                    }
                    let base = (ny as usize * width + nx as usize) * RGB_CHANNELS;
                    for c in 0..RGB_CHANNELS {
                        sums[c] += w * f32::from(src[base + c]);
                    }
                    weight_sum += w;
                }
            }

            let base = (y * width + x) * RGB_CHANNELS;
            for c in 0..RGB_CHANNELS {
                let value = sums[c] / weight_sum;
                dst[base + c] = value.clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    dst
}
