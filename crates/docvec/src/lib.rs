//! # docvec
//!
//! Averaged word-embedding document vectors for ML pipelines.
//!
//! docvec turns tokenized documents into fixed-length `f32` feature rows that
//! a downstream classifier or regressor can consume. A word-embedding model
//! is trained on the corpus (or supplied pretrained), and each document is
//! represented by the mean of the vectors of the words the model knows.
//!
//! ## Quick Start
//!
//! ```rust
//! use docvec::prelude::*;
//!
//! let corpus = vec![
//!     vec!["the", "cell", "membrane", "controls", "transport"],
//!     vec!["proteins", "cross", "the", "membrane"],
//! ];
//!
//! let options = Word2VecOptions::default()
//!     .with_vector_size(16)
//!     .with_min_count(1);
//!
//! let mut averager = DocumentEmbeddingAverager::new(options);
//! let features = averager.fit_transform(&corpus).unwrap();
//! assert_eq!(features.dim(), (2, 16));
//! ```
//!
//! ## Architecture
//!
//! - [`docvec_embeddings`] - Word-level trainers, lookup tables and options
//! - [`DocumentEmbeddingAverager`] - Document-level averaging stage
//! - [`Transformer`] - The fit/transform contract pipelines program against
//!
//! The averager is generic over its [`EmbeddingTrainer`], so pretrained
//! vectors or another trainer can replace word2vec without touching the
//! averaging code.
//!
//! ## Features
//!
//! - `parallel`: `par_transform`, computing document rows with rayon

mod averager;
mod transformer;

pub use averager::DocumentEmbeddingAverager;
pub use transformer::Transformer;

pub use docvec_embeddings;
pub use docvec_embeddings::{
    Algorithm, Document, EmbeddingError, EmbeddingResult, EmbeddingTrainer, HashFunction,
    KeyedVectors, Pretrained, Word2Vec, Word2VecModel, Word2VecOptions, WordVectors,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DocumentEmbeddingAverager, Transformer};
    pub use docvec_embeddings::prelude::*;
}
