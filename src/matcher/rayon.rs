//! Rayon-parallel identification (feature-gated).
//!
//! `identify` is embarrassingly parallel: every database entry is scored
//! independently against the same immutable query, and each result lands in
//! its own output slot. Fan-out order does not affect the result order,
//! which stays index-aligned with the database.

use crate::matcher::{check_lengths, template_distance};
use crate::util::FpMatchResult;
use rayon::prelude::*;

/// Parallel variant of [`crate::matcher::identify`] with the same contract.
///
/// Lengths are validated up front on the calling thread; the distance
/// computations then fan out across the rayon pool.
pub fn identify_par(query: &[f32], database: &[Vec<f32>]) -> FpMatchResult<Vec<f32>> {
    for entry in database {
        check_lengths(query, entry)?;
    }

    database
        .par_iter()
        .map(|entry| template_distance(query, entry))
        .collect()
}
