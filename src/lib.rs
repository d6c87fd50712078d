//! FpMatch prepares fingerprint images for a biometric embedding model and
//! scores the resulting embeddings.
//!
//! The preprocessing pipeline (constrained bitmap decode, three-stage resize,
//! channel normalization, layout reshape) is deterministic and bit-exact; the
//! matcher layer provides pairwise verification and 1:N identification over
//! fixed-length embeddings. The embedding model itself is an external
//! collaborator behind the [`EmbeddingEngine`] trait. Optional parallelism
//! for identification is available via the `rayon` feature.

pub mod engine;
pub mod matcher;
pub mod pipeline;
pub mod raster;
pub mod resample;
pub mod tensor;
pub(crate) mod trace;
pub mod util;

pub use engine::{embed_checked, EmbeddingEngine, EMBEDDING_LEN};
pub use matcher::{cosine_similarity, identify, template_distance, verify};
pub use pipeline::{extract_template, prepare_tensor};
pub use raster::{decode, RasterImage};
pub use resample::resize;
pub use tensor::{normalize, to_channel_major, to_pixel_major, NormalizedTensor};
pub use util::{FpMatchError, FpMatchResult};

#[cfg(feature = "rayon")]
pub use matcher::identify_par;
