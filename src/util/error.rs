//! Error types for fpmatch.

use thiserror::Error;

/// Result alias for fpmatch operations.
pub type FpMatchResult<T> = std::result::Result<T, FpMatchError>;

/// Errors that can occur while decoding, preprocessing, or scoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FpMatchError {
    /// The raster container does not start with the `BM` signature.
    #[error("invalid raster signature (expected 'BM')")]
    InvalidSignature,
    /// The raster container uses a bit depth other than 8 or 24.
    #[error("unsupported raster format: {bits} bits per pixel")]
    UnsupportedFormat {
        /// Bits per pixel declared in the header.
        bits: u16,
    },
    /// The declared image size exceeds the bytes actually available.
    #[error("truncated raster data: need {needed} bytes, got {got}")]
    TruncatedData {
        /// Bytes required by the header fields.
        needed: usize,
        /// Bytes actually present in the input.
        got: usize,
    },
    /// The header declares a zero or negative dimension.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Declared width in pixels.
        width: i64,
        /// Declared height in pixels.
        height: i64,
    },
    /// A buffer is smaller than the operation requires.
    #[error("buffer too small: need {needed} elements, got {got}")]
    BufferTooSmall {
        /// Elements required.
        needed: usize,
        /// Elements provided.
        got: usize,
    },
    /// A pixel or tensor buffer could not be allocated.
    #[error("allocation failure")]
    AllocationFailure,
    /// Two vectors passed to the matcher have different lengths.
    #[error("vector length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Length of the reference vector.
        expected: usize,
        /// Length of the offending vector.
        got: usize,
    },
    /// The external embedding engine could not be reached or run.
    #[error("embedding engine unavailable: {reason}")]
    EngineUnavailable {
        /// Engine-provided failure description.
        reason: String,
    },
    /// The embedding engine returned a vector of unexpected length.
    #[error("embedding engine shape mismatch: expected {expected} values, got {got}")]
    EngineShapeMismatch {
        /// Expected embedding length.
        expected: usize,
        /// Length actually returned.
        got: usize,
    },
}
