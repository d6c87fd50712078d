//! End-to-end preprocessing: raster bytes to a model-ready tensor.
//!
//! Every stage owns its buffer exclusively and hands it to the next stage by
//! move: decode buffer, resize scratch, tensor. The source bytes are read by
//! the caller before this module runs; no file handle is held across a
//! preprocessing or scoring call.

use crate::engine::{embed_checked, EmbeddingEngine};
use crate::raster;
use crate::resample;
use crate::tensor::{NormalizedTensor, TARGET_HEIGHT, TARGET_WIDTH};
use crate::trace::{trace_event, trace_span};
use crate::util::FpMatchResult;

/// Decodes, resizes, and normalizes raster bytes into the model input tensor.
pub fn prepare_tensor(bytes: &[u8]) -> FpMatchResult<NormalizedTensor> {
    let _guard = trace_span!("prepare_tensor", input_len = bytes.len()).entered();

    let decoded = raster::decode(bytes)?;
    trace_event!(
        "decoded",
        width = decoded.width(),
        height = decoded.height(),
    );

    let resized = resample::resize(&decoded, TARGET_WIDTH, TARGET_HEIGHT)?;
    NormalizedTensor::from_image(&resized)
}

/// Produces a fingerprint template from raster bytes via the given engine.
///
/// The returned vector has passed the engine shape check and is safe to hand
/// to the matcher.
pub fn extract_template<E: EmbeddingEngine + ?Sized>(
    engine: &E,
    bytes: &[u8],
) -> FpMatchResult<Vec<f32>> {
    let tensor = prepare_tensor(bytes)?;
    embed_checked(engine, &tensor)
}
