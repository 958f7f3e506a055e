//! Pretrained vectors as a trainer.

use crate::corpus::Document;
use crate::keyed_vectors::KeyedVectors;
use crate::options::Word2VecOptions;
use crate::{EmbeddingError, EmbeddingResult, EmbeddingTrainer, WordVectors};
use std::sync::Arc;

/// A trainer that ignores the corpus and returns a fixed table.
///
/// Lets pretrained vectors stand in wherever a trainer is expected; fitting
/// is then just a dimension check.
#[derive(Debug, Clone)]
pub struct Pretrained {
    vectors: Arc<KeyedVectors>,
}

impl Pretrained {
    pub fn new(vectors: KeyedVectors) -> Self {
        Self {
            vectors: Arc::new(vectors),
        }
    }

    /// The shared table handed out by [`train`](EmbeddingTrainer::train).
    pub fn vectors(&self) -> &Arc<KeyedVectors> {
        &self.vectors
    }
}

impl EmbeddingTrainer for Pretrained {
    type Model = Arc<KeyedVectors>;

    fn train<D>(&self, _corpus: &[D], options: &Word2VecOptions) -> EmbeddingResult<Self::Model>
    where
        D: Document,
    {
        if self.vectors.dimension() != options.vector_size {
            return Err(EmbeddingError::DimensionMismatch {
                expected: options.vector_size,
                got: self.vectors.dimension(),
            });
        }
        Ok(Arc::clone(&self.vectors))
    }
}
