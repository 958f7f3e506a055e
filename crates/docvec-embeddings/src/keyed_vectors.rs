//! Word-to-vector lookup table.

use crate::{EmbeddingError, EmbeddingResult, WordVectors};
use std::collections::HashMap;

/// A fixed-dimension table of word vectors.
///
/// Vectors are stored contiguously in insertion order. This is what the
/// word2vec trainer produces, and it can also be filled directly from
/// pretrained vectors.
///
/// # Example
///
/// ```rust
/// use docvec_embeddings::{KeyedVectors, WordVectors};
///
/// let vectors = KeyedVectors::from_pairs(2, [
///     ("cell", vec![1.0, 0.0]),
///     ("membrane", vec![0.0, 1.0]),
/// ]).unwrap();
/// assert!(vectors.contains("cell"));
/// assert_eq!(vectors.vector_of("membrane"), Some(&[0.0, 1.0][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedVectors {
    dimension: usize,
    words: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<f32>,
}

impl KeyedVectors {
    /// Create an empty table.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            words: Vec::new(),
            index: HashMap::new(),
            data: Vec::new(),
        }
    }

    /// Build a table from `(word, vector)` pairs; later duplicates win.
    pub fn from_pairs<W, I>(dimension: usize, pairs: I) -> EmbeddingResult<Self>
    where
        W: Into<String>,
        I: IntoIterator<Item = (W, Vec<f32>)>,
    {
        let mut vectors = Self::new(dimension);
        for (word, vector) in pairs {
            vectors.insert(word, &vector)?;
        }
        Ok(vectors)
    }

    /// Build from a word list and a row-major matrix of matching size.
    pub(crate) fn from_parts(dimension: usize, words: Vec<String>, data: Vec<f32>) -> Self {
        debug_assert_eq!(words.len() * dimension, data.len());
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self {
            dimension,
            words,
            index,
            data,
        }
    }

    /// Insert or replace the vector for `word`.
    pub fn insert(&mut self, word: impl Into<String>, vector: &[f32]) -> EmbeddingResult<()> {
        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }

        let word = word.into();
        match self.index.get(&word) {
            Some(&i) => {
                let start = i * self.dimension;
                self.data[start..start + self.dimension].copy_from_slice(vector);
            }
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push(word);
                self.data.extend_from_slice(vector);
            }
        }
        Ok(())
    }

    /// Words in insertion order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Position of `word` in the table.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Vector at a table position.
    pub fn vector_at(&self, index: usize) -> Option<&[f32]> {
        if index >= self.words.len() {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }
}

impl WordVectors for KeyedVectors {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn vector_of(&self, word: &str) -> Option<&[f32]> {
        self.index_of(word).and_then(|i| self.vector_at(i))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}
