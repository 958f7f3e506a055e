//! Word2vec hyperparameters.
//!
//! [`Word2VecOptions`] is a plain record: every recognized option is a named
//! field, missing fields fall back to the defaults below, and the whole thing
//! can be read from a TOML (or JSON) file.
//!
//! ```toml
//! vector_size = 100
//! window = 5
//! min_count = 1
//! algorithm = "skip_gram"
//! epochs = 20
//! ```

use crate::hashing::HashFunction;
use crate::EmbeddingResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Training architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Continuous bag of words: predict a word from its context.
    #[default]
    Cbow,
    /// Skip-gram: predict the context from a word.
    SkipGram,
}

/// Options for the word-embedding trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Word2VecOptions {
    /// Dimensionality of word and document vectors.
    #[serde(default = "default_vector_size", alias = "size")]
    pub vector_size: usize,
    /// Initial learning rate.
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// Learning rate reached at the end of training.
    #[serde(default = "default_min_alpha")]
    pub min_alpha: f32,
    /// Maximum distance between the current and predicted word.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Words with a lower total frequency are ignored.
    #[serde(default = "default_min_count")]
    pub min_count: u64,
    /// Cap on distinct words held during the vocabulary scan.
    #[serde(default)]
    pub max_vocab_size: Option<usize>,
    /// Downsampling threshold for frequent words; `0.0` disables it.
    #[serde(default = "default_sample")]
    pub sample: f64,
    /// Seed for vector initialization and all training randomness.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Worker thread hint for the trainer.
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Use hierarchical softmax.
    #[serde(default, alias = "hs")]
    pub hierarchical_softmax: bool,
    /// Noise words drawn per positive example; `0` disables negative sampling.
    #[serde(default = "default_negative")]
    pub negative: usize,
    /// Average (true) or sum (false) the context vectors in CBOW.
    #[serde(default = "default_true")]
    pub cbow_mean: bool,
    /// Hash used to seed each word's initial vector.
    #[serde(default)]
    pub hash_function: HashFunction,
    /// Passes over the corpus.
    #[serde(default = "default_epochs", alias = "iter")]
    pub epochs: usize,
    /// Add a `\0` padding word to the vocabulary.
    #[serde(default)]
    pub null_word: bool,
    /// Sort the vocabulary by descending frequency.
    #[serde(default = "default_true")]
    pub sorted_vocab: bool,
    /// Words processed between learning-rate updates.
    #[serde(default = "default_batch_words")]
    pub batch_words: usize,
    /// Track the training loss.
    #[serde(default)]
    pub compute_loss: bool,
}

// Default value functions
fn default_vector_size() -> usize { 10 }
fn default_alpha() -> f32 { 0.025 }
fn default_min_alpha() -> f32 { 0.0001 }
fn default_window() -> usize { 5 }
fn default_min_count() -> u64 { 5 }
fn default_sample() -> f64 { 5e-5 }
fn default_seed() -> u64 { 1 }
fn default_workers() -> usize { 3 }
fn default_negative() -> usize { 5 }
fn default_epochs() -> usize { 50 }
fn default_batch_words() -> usize { 1 }
fn default_true() -> bool { true }

impl Default for Word2VecOptions {
    fn default() -> Self {
        Self {
            vector_size: default_vector_size(),
            alpha: default_alpha(),
            min_alpha: default_min_alpha(),
            window: default_window(),
            min_count: default_min_count(),
            max_vocab_size: None,
            sample: default_sample(),
            seed: default_seed(),
            workers: default_workers(),
            algorithm: Algorithm::default(),
            hierarchical_softmax: false,
            negative: default_negative(),
            cbow_mean: true,
            hash_function: HashFunction::default(),
            epochs: default_epochs(),
            null_word: false,
            sorted_vocab: true,
            batch_words: default_batch_words(),
            compute_loss: false,
        }
    }
}

impl Word2VecOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(content: &str) -> EmbeddingResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse options from a JSON object.
    pub fn from_json_str(content: &str) -> EmbeddingResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load options from a file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> EmbeddingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn with_vector_size(mut self, vector_size: usize) -> Self {
        self.vector_size = vector_size;
        self
    }

    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_sample(mut self, sample: f64) -> Self {
        self.sample = sample;
        self
    }

    pub fn with_compute_loss(mut self, compute_loss: bool) -> Self {
        self.compute_loss = compute_loss;
        self
    }
}
