//! Core trainer traits and error types.

use crate::corpus::Document;
use crate::options::Word2VecOptions;
use std::sync::Arc;
use thiserror::Error;

/// Embedding error types.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty vocabulary: {0}")]
    EmptyVocabulary(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Failed to parse options: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to parse options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Read access to a trained word-to-vector mapping.
///
/// Implementors hand out vectors of exactly [`dimension`](WordVectors::dimension)
/// components for every word they contain.
pub trait WordVectors: Send + Sync {
    /// Whether `word` has a vector.
    fn contains(&self, word: &str) -> bool;

    /// The vector for `word`, or `None` if it is out of vocabulary.
    fn vector_of(&self, word: &str) -> Option<&[f32]>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Number of words in the vocabulary.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<W: WordVectors + ?Sized> WordVectors for Arc<W> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn vector_of(&self, word: &str) -> Option<&[f32]> {
        (**self).vector_of(word)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Something that turns a tokenized corpus into [`WordVectors`].
///
/// The options record is passed on every call so a single trainer value can be
/// reused across differently configured runs.
pub trait EmbeddingTrainer {
    /// The trained model type.
    type Model: WordVectors;

    /// Train a fresh model on `corpus`.
    fn train<D>(&self, corpus: &[D], options: &Word2VecOptions) -> EmbeddingResult<Self::Model>
    where
        D: Document;
}

/// Hooks invoked by a trainer around each epoch.
///
/// `loss` is the summed loss of the epoch when `compute_loss` is enabled and
/// `0.0` otherwise.
pub trait TrainingCallback: Send + Sync {
    fn on_epoch_begin(&self, _epoch: usize) {}

    fn on_epoch_end(&self, _epoch: usize, _loss: f64) {}
}
