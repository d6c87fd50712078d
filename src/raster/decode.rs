//! Constrained bitmap container decoder.
//!
//! Supports exactly two pixel encodings: 24-bit interleaved RGB and 8-bit
//! grayscale (expanded to R=G=B during decode). Header fields are read
//! through bounds-checked little-endian readers; no field is trusted until
//! the bytes backing it are known to exist. The stored height's sign encodes
//! row order (negative = top-down, positive = bottom-up); the returned image
//! is always normalized to top-down.

use crate::raster::{alloc_bytes, RasterImage, RGB_CHANNELS};
use crate::util::{FpMatchError, FpMatchResult};

/// Byte offset of the pixel-data-offset field.
const PIXEL_OFFSET_FIELD: usize = 10;
/// Byte offset of the signed width field.
const WIDTH_FIELD: usize = 18;
/// Byte offset of the signed height field.
const HEIGHT_FIELD: usize = 22;
/// Byte offset of the bits-per-pixel field.
const BPP_FIELD: usize = 28;

fn read_u16_le(bytes: &[u8], offset: usize) -> FpMatchResult<u16> {
    let field = bytes
        .get(offset..offset + 2)
        .ok_or(FpMatchError::TruncatedData {
            needed: offset + 2,
            got: bytes.len(),
        })?;
    Ok(u16::from_le_bytes([field[0], field[1]]))
}

fn read_u32_le(bytes: &[u8], offset: usize) -> FpMatchResult<u32> {
    let field = bytes
        .get(offset..offset + 4)
        .ok_or(FpMatchError::TruncatedData {
            needed: offset + 4,
            got: bytes.len(),
        })?;
    Ok(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

fn read_i32_le(bytes: &[u8], offset: usize) -> FpMatchResult<i32> {
    read_u32_le(bytes, offset).map(|v| v as i32)
}

/// Rounds a row length in bytes up to the container's 4-byte alignment.
fn aligned_stride(row_bytes: usize) -> FpMatchResult<usize> {
    let padded = row_bytes
        .checked_add(3)
        .ok_or(FpMatchError::AllocationFailure)?;
    Ok(padded / 4 * 4)
}

/// Decodes a constrained bitmap container into a top-down RGB image.
///
/// The caller owns the source bytes; no file handle or global state is
/// involved. Errors identify the failing header field or the expected vs.
/// available byte counts so the caller can log and skip the image.
pub fn decode(bytes: &[u8]) -> FpMatchResult<RasterImage> {
    let signature = bytes.get(0..2).ok_or(FpMatchError::TruncatedData {
        needed: 2,
        got: bytes.len(),
    })?;
    if signature != b"BM" {
        return Err(FpMatchError::InvalidSignature);
    }

    let pixel_offset = read_u32_le(bytes, PIXEL_OFFSET_FIELD)? as usize;
    let stored_width = read_i32_le(bytes, WIDTH_FIELD)?;
    let stored_height = read_i32_le(bytes, HEIGHT_FIELD)?;
    let bpp = read_u16_le(bytes, BPP_FIELD)?;

    if stored_width <= 0 || stored_height == 0 {
        return Err(FpMatchError::InvalidDimensions {
            width: i64::from(stored_width),
            height: i64::from(stored_height),
        });
    }
    let width = stored_width as u32;
    // Negative stored height means the rows are already top-down.
    let top_down = stored_height < 0;
    let height = stored_height.unsigned_abs();

    match bpp {
        24 => decode_rgb24(bytes, pixel_offset, width, height, top_down),
        8 => decode_gray8(bytes, pixel_offset, width, height, top_down),
        bits => Err(FpMatchError::UnsupportedFormat { bits }),
    }
}

fn pixel_rows<'a>(
    bytes: &'a [u8],
    pixel_offset: usize,
    src_stride: usize,
    height: u32,
) -> FpMatchResult<&'a [u8]> {
    let data_len = src_stride
        .checked_mul(height as usize)
        .ok_or(FpMatchError::AllocationFailure)?;
    let needed = pixel_offset
        .checked_add(data_len)
        .ok_or(FpMatchError::AllocationFailure)?;
    if bytes.len() < needed {
        return Err(FpMatchError::TruncatedData {
            needed,
            got: bytes.len(),
        });
    }
    Ok(&bytes[pixel_offset..needed])
}

/// Maps a stored row index to its top-down position.
fn normalized_row(y: u32, height: u32, top_down: bool) -> usize {
    if top_down {
        y as usize
    } else {
        (height - 1 - y) as usize
    }
}

fn decode_rgb24(
    bytes: &[u8],
    pixel_offset: usize,
    width: u32,
    height: u32,
    top_down: bool,
) -> FpMatchResult<RasterImage> {
    let row_bytes = (width as usize)
        .checked_mul(RGB_CHANNELS)
        .ok_or(FpMatchError::AllocationFailure)?;
    let src_stride = aligned_stride(row_bytes)?;
    let rows = pixel_rows(bytes, pixel_offset, src_stride, height)?;

    let dst_len = src_stride
        .checked_mul(height as usize)
        .ok_or(FpMatchError::AllocationFailure)?;
    let mut pixels = alloc_bytes(dst_len)?;
    for y in 0..height {
        let src_start = y as usize * src_stride;
        let dst_start = normalized_row(y, height, top_down) * src_stride;
        // Full-row copy including padding so alignment bytes stay intact.
        pixels[dst_start..dst_start + src_stride]
            .copy_from_slice(&rows[src_start..src_start + src_stride]);
    }

    RasterImage::from_vec(pixels, width, height, src_stride as u32)
}

fn decode_gray8(
    bytes: &[u8],
    pixel_offset: usize,
    width: u32,
    height: u32,
    top_down: bool,
) -> FpMatchResult<RasterImage> {
    let src_stride = aligned_stride(width as usize)?;
    let rows = pixel_rows(bytes, pixel_offset, src_stride, height)?;

    let row_bytes = (width as usize)
        .checked_mul(RGB_CHANNELS)
        .ok_or(FpMatchError::AllocationFailure)?;
    let dst_stride = aligned_stride(row_bytes)?;
    let dst_len = dst_stride
        .checked_mul(height as usize)
        .ok_or(FpMatchError::AllocationFailure)?;
    let mut pixels = alloc_bytes(dst_len)?;
    for y in 0..height {
        let src_start = y as usize * src_stride;
        let dst_start = normalized_row(y, height, top_down) * dst_stride;
        for x in 0..width as usize {
            let gray = rows[src_start + x];
            let base = dst_start + x * RGB_CHANNELS;
            pixels[base] = gray;
            pixels[base + 1] = gray;
            pixels[base + 2] = gray;
        }
    }

    RasterImage::from_vec(pixels, width, height, dst_stride as u32)
}

#[cfg(test)]
mod tests {
    use super::aligned_stride;

    #[test]
    fn aligned_stride_rounds_up_to_four() {
        assert_eq!(aligned_stride(3).unwrap(), 4);
        assert_eq!(aligned_stride(4).unwrap(), 4);
        assert_eq!(aligned_stride(9).unwrap(), 12);
        assert_eq!(aligned_stride(12).unwrap(), 12);
    }
}
