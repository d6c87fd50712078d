//! Embedding comparison: pairwise verification and 1:N identification.
//!
//! Distances are `1 - cosine_similarity`, so the range is [0, 2]: 0 means
//! identical direction, 1 orthogonal, 2 opposite. A zero-magnitude vector on
//! either side of a comparison saturates the similarity to 0 rather than
//! erroring; this keeps degenerate (all-zero) embeddings scorable.

use crate::trace::{trace_event, trace_span};
use crate::util::{FpMatchError, FpMatchResult};

#[cfg(feature = "rayon")]
mod rayon;

#[cfg(feature = "rayon")]
pub use self::rayon::identify_par;

fn check_lengths(a: &[f32], b: &[f32]) -> FpMatchResult<()> {
    if a.len() != b.len() {
        return Err(FpMatchError::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}

/// Computes the cosine similarity between two equal-length vectors.
///
/// Returns exactly `0.0` when either vector has zero magnitude, and clamps
/// the result into [-1, 1] so rounding noise cannot push a distance outside
/// [0, 2]. A self-comparison therefore scores exactly 1.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> FpMatchResult<f32> {
    check_lengths(a, b)?;

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a * norm_b).sqrt()).clamp(-1.0, 1.0))
}

/// Computes the template distance `1 - cosine_similarity`, range [0, 2].
pub fn template_distance(a: &[f32], b: &[f32]) -> FpMatchResult<f32> {
    Ok(1.0 - cosine_similarity(a, b)?)
}

/// Scores a 1:1 verification pair. Alias for [`template_distance`]; the
/// accept/reject threshold is applied by the caller.
pub fn verify(a: &[f32], b: &[f32]) -> FpMatchResult<f32> {
    template_distance(a, b)
}

/// Scores a query against every enrolled template.
///
/// The result is index-aligned with `database`; no sorting or thresholding
/// is applied. All entry lengths are validated against the query before any
/// distance is computed, so a mismatch never yields a partial score vector.
pub fn identify(query: &[f32], database: &[Vec<f32>]) -> FpMatchResult<Vec<f32>> {
    let _guard = trace_span!("identify", db_size = database.len()).entered();

    for entry in database {
        check_lengths(query, entry)?;
    }

    let mut scores = Vec::with_capacity(database.len());
    for entry in database {
        scores.push(template_distance(query, entry)?);
    }

    trace_event!("identify_done", scored = scores.len());
    Ok(scores)
}
