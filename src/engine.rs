//! Boundary to the external embedding engine.
//!
//! The engine itself (a neural-network inference session) lives outside this
//! crate; callers hand in an already-initialized implementation of
//! [`EmbeddingEngine`]. This module only pins down the tensor-in /
//! vector-out contract and validates the returned embedding length before it
//! reaches the matcher.

use crate::tensor::NormalizedTensor;
use crate::util::{FpMatchError, FpMatchResult};

/// Length of the embedding vector the engine must return.
pub const EMBEDDING_LEN: usize = 64;

/// An opaque, already-initialized embedding model.
///
/// Implementations report a failure to run as
/// [`FpMatchError::EngineUnavailable`]; they are not expected to retry.
pub trait EmbeddingEngine {
    /// Runs the model on a prepared input tensor and returns the raw
    /// embedding vector.
    fn embed(&self, tensor: &NormalizedTensor) -> FpMatchResult<Vec<f32>>;
}

/// Runs the engine and validates the returned embedding shape.
///
/// A vector of any length other than [`EMBEDDING_LEN`] is rejected with
/// [`FpMatchError::EngineShapeMismatch`] so malformed engine output never
/// reaches the scoring layer.
pub fn embed_checked<E: EmbeddingEngine + ?Sized>(
    engine: &E,
    tensor: &NormalizedTensor,
) -> FpMatchResult<Vec<f32>> {
    let embedding = engine.embed(tensor)?;
    if embedding.len() != EMBEDDING_LEN {
        return Err(FpMatchError::EngineShapeMismatch {
            expected: EMBEDDING_LEN,
            got: embedding.len(),
        });
    }
    Ok(embedding)
}
