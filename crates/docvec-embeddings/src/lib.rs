//! # docvec Embeddings
//!
//! Word-embedding backends for docvec.
//!
//! This crate is the word-level half of the pipeline:
//! - Training word vectors from a tokenized corpus ([`Word2Vec`])
//! - Looking up vectors by word ([`WordVectors`], [`KeyedVectors`], [`Pretrained`])
//! - The options record that drives training ([`Word2VecOptions`])
//!
//! Document-level averaging lives in the `docvec` crate, which only talks to
//! this crate through the [`EmbeddingTrainer`] and [`WordVectors`] traits.
//!
//! ## Usage
//!
//! ```rust
//! use docvec_embeddings::{EmbeddingTrainer, Word2Vec, Word2VecOptions, WordVectors};
//!
//! let corpus = vec![vec!["cat", "sat"], vec!["dog", "ran"]];
//! let options = Word2VecOptions::default().with_vector_size(4).with_min_count(1);
//! let model = Word2Vec::new().train(&corpus, &options).unwrap();
//! assert!(model.contains("cat"));
//! ```

mod corpus;
mod hashing;
mod keyed_vectors;
mod ops;
mod options;
mod pretrained;
mod trainer;
mod vocab;
mod word2vec;

pub use corpus::{corpus_token_count, Document};
pub use hashing::HashFunction;
pub use keyed_vectors::KeyedVectors;
pub use options::{Algorithm, Word2VecOptions};
pub use pretrained::Pretrained;
pub use trainer::{EmbeddingError, EmbeddingResult, EmbeddingTrainer, TrainingCallback, WordVectors};
pub use vocab::{RuleResult, TrimRule, NULL_WORD};
pub use word2vec::{Word2Vec, Word2VecModel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Algorithm, Document, HashFunction, Word2VecOptions};
    pub use crate::{EmbeddingError, EmbeddingResult, EmbeddingTrainer, WordVectors};
    pub use crate::{KeyedVectors, Pretrained, Word2Vec, Word2VecModel};
}
