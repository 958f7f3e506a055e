//! Word2vec trainer.
//!
//! Skip-gram and CBOW with negative sampling and/or hierarchical softmax.
//! Training runs on one thread from a single seeded RNG, so a fixed seed and
//! corpus always produce the same vectors.

use crate::corpus::{corpus_token_count, Document};
use crate::keyed_vectors::KeyedVectors;
use crate::ops::{axpy, dot_product, neg_log_sigmoid, scale, sigmoid};
use crate::options::{Algorithm, Word2VecOptions};
use crate::vocab::{scan_vocab, TrimRule, Vocabulary};
use crate::{EmbeddingError, EmbeddingResult, EmbeddingTrainer, TrainingCallback, WordVectors};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Sentences longer than this are split into independent chunks.
const MAX_WORDS_IN_SENTENCE: usize = 10_000;

/// The default embedding trainer.
///
/// Hyperparameters come from the [`Word2VecOptions`] passed to
/// [`train`](EmbeddingTrainer::train); the trim rule and callbacks are
/// attached here because they are code, not configuration.
///
/// # Example
///
/// ```rust
/// use docvec_embeddings::{EmbeddingTrainer, Word2Vec, Word2VecOptions, WordVectors};
///
/// let corpus = vec![vec!["cell", "membrane"], vec!["protein", "membrane"]];
/// let options = Word2VecOptions::default().with_vector_size(8).with_min_count(1);
/// let model = Word2Vec::new().train(&corpus, &options).unwrap();
/// assert_eq!(model.vector_of("membrane").unwrap().len(), 8);
/// ```
#[derive(Default)]
pub struct Word2Vec {
    trim_rule: Option<Box<dyn TrimRule>>,
    callbacks: Vec<Box<dyn TrainingCallback>>,
}

impl Word2Vec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the `min_count` decision per word.
    pub fn with_trim_rule(mut self, rule: impl TrimRule + 'static) -> Self {
        self.trim_rule = Some(Box::new(rule));
        self
    }

    /// Register an epoch callback.
    pub fn with_callback(mut self, callback: impl TrainingCallback + 'static) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for Word2Vec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Word2Vec")
            .field("trim_rule", &self.trim_rule.is_some())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// A trained word2vec model.
#[derive(Debug, Clone)]
pub struct Word2VecModel {
    vectors: KeyedVectors,
    counts: Vec<u64>,
    training_loss: f64,
    epochs: usize,
}

impl Word2VecModel {
    /// The learned word vectors.
    pub fn vectors(&self) -> &KeyedVectors {
        &self.vectors
    }

    /// Consume the model, keeping only the vectors.
    pub fn into_vectors(self) -> KeyedVectors {
        self.vectors
    }

    /// Corpus frequency of a vocabulary word.
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.vectors.index_of(word).map(|i| self.counts[i])
    }

    /// Summed loss over all epochs; `0.0` unless `compute_loss` was set.
    pub fn training_loss(&self) -> f64 {
        self.training_loss
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }
}

impl WordVectors for Word2VecModel {
    fn contains(&self, word: &str) -> bool {
        self.vectors.contains(word)
    }

    fn vector_of(&self, word: &str) -> Option<&[f32]> {
        self.vectors.vector_of(word)
    }

    fn dimension(&self) -> usize {
        self.vectors.dimension()
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}

impl EmbeddingTrainer for Word2Vec {
    type Model = Word2VecModel;

    fn train<D>(&self, corpus: &[D], options: &Word2VecOptions) -> EmbeddingResult<Word2VecModel>
    where
        D: Document,
    {
        validate(options)?;

        let rule = self.trim_rule.as_deref();
        let raw = scan_vocab(corpus, options.max_vocab_size, rule);
        let raw_total = raw.total_words;
        let vocab = Vocabulary::prepare(raw, options, rule);
        if vocab.is_empty() {
            return Err(EmbeddingError::EmptyVocabulary(format!(
                "no word in {} tokens reached min_count {}",
                raw_total, options.min_count
            )));
        }

        info!(
            "Training word2vec: {} words, {} retained tokens, {} epochs, {:?}",
            vocab.len(),
            vocab.retained_total,
            options.epochs,
            options.algorithm
        );
        debug!("Worker hint {} ignored; training is sequential", options.workers);

        let mut state = TrainingState::new(&vocab, options);
        let total_words = schedule_length(corpus_token_count(corpus), options.epochs);
        let mut total_loss = 0.0;

        for epoch in 0..options.epochs {
            for callback in &self.callbacks {
                callback.on_epoch_begin(epoch);
            }

            let mut epoch_loss = 0.0;
            for doc in corpus {
                let indices: Vec<usize> = doc
                    .tokens()
                    .filter_map(|t| vocab.index.get(t).copied())
                    .collect();
                for chunk in indices.chunks(MAX_WORDS_IN_SENTENCE) {
                    epoch_loss += state.train_sentence(chunk);
                }
                state.advance(doc.token_count() as u64, total_words);
            }

            debug!("Epoch {} finished, loss {:.4}", epoch, epoch_loss);
            for callback in &self.callbacks {
                callback.on_epoch_end(epoch, epoch_loss);
            }
            total_loss += epoch_loss;
        }

        info!("Training finished, loss {:.4}", total_loss);

        let words = vocab.entries.iter().map(|e| e.word.clone()).collect();
        let counts = vocab.entries.iter().map(|e| e.count).collect();
        Ok(Word2VecModel {
            vectors: KeyedVectors::from_parts(options.vector_size, words, state.syn0),
            counts,
            training_loss: total_loss,
            epochs: options.epochs,
        })
    }
}

fn validate(options: &Word2VecOptions) -> EmbeddingResult<()> {
    let problem = if options.vector_size == 0 {
        "vector_size must be positive"
    } else if options.window == 0 {
        "window must be positive"
    } else if options.epochs == 0 {
        "epochs must be positive"
    } else if options.workers == 0 {
        "workers must be positive"
    } else if options.batch_words == 0 {
        "batch_words must be positive"
    } else if !(options.alpha > 0.0) {
        "alpha must be positive"
    } else if !(options.min_alpha >= 0.0) {
        "min_alpha must not be negative"
    } else if !(options.sample >= 0.0) {
        "sample must not be negative"
    } else if !options.hierarchical_softmax && options.negative == 0 {
        "enable hierarchical softmax or negative sampling"
    } else {
        return Ok(());
    };
    Err(EmbeddingError::InvalidConfig(problem.to_string()))
}

/// Raw words the learning-rate schedule spans, never zero.
fn schedule_length(words_per_epoch: u64, epochs: usize) -> u64 {
    words_per_epoch.saturating_mul(epochs as u64).max(1)
}

/// Mutable weights and schedule for one training run.
struct TrainingState<'a> {
    vocab: &'a Vocabulary,
    options: &'a Word2VecOptions,
    dim: usize,
    /// Input (word) vectors, row-major.
    syn0: Vec<f32>,
    /// Output vectors for negative sampling.
    syn1neg: Vec<f32>,
    /// Inner-node vectors for hierarchical softmax.
    syn1: Vec<f32>,
    rng: StdRng,
    alpha: f32,
    words_done: u64,
    words_since_update: u64,
    /// Scratch buffers
    neu1: Vec<f32>,
    neu1e: Vec<f32>,
}

impl<'a> TrainingState<'a> {
    fn new(vocab: &'a Vocabulary, options: &'a Word2VecOptions) -> Self {
        let dim = options.vector_size;
        let n = vocab.len();

        let mut syn0 = Vec::with_capacity(n * dim);
        for entry in &vocab.entries {
            syn0.extend(
                options
                    .hash_function
                    .seeded_vector(&entry.word, options.seed, dim),
            );
        }

        Self {
            vocab,
            options,
            dim,
            syn0,
            syn1neg: if options.negative > 0 {
                vec![0.0; n * dim]
            } else {
                Vec::new()
            },
            syn1: if options.hierarchical_softmax {
                vec![0.0; n.saturating_sub(1) * dim]
            } else {
                Vec::new()
            },
            rng: StdRng::seed_from_u64(options.seed),
            alpha: options.alpha,
            words_done: 0,
            words_since_update: 0,
            neu1: vec![0.0; dim],
            neu1e: vec![0.0; dim],
        }
    }

    /// Account for processed raw tokens and decay the learning rate every
    /// `batch_words` tokens.
    fn advance(&mut self, raw_words: u64, total_words: u64) {
        self.words_done += raw_words;
        self.words_since_update += raw_words;
        if self.words_since_update >= self.options.batch_words as u64 {
            self.words_since_update = 0;
            let progress = (self.words_done as f64 / total_words as f64).min(1.0) as f32;
            let (start, end) = (self.options.alpha, self.options.min_alpha);
            self.alpha = (start - (start - end) * progress).max(end);
        }
    }

    fn row(&self, word: usize) -> std::ops::Range<usize> {
        word * self.dim..(word + 1) * self.dim
    }

    /// Train on one sentence of vocabulary indices, returning its loss.
    fn train_sentence(&mut self, indices: &[usize]) -> f64 {
        // Downsample frequent words; unknown words are already gone.
        let sentence: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&w| (self.rng.gen::<u32>() as u64) <= self.vocab.entries[w].sample_int)
            .collect();

        let window = self.options.window;
        let mut loss = 0.0;
        for pos in 0..sentence.len() {
            let reduced = self.rng.gen_range(0..window);
            let start = pos.saturating_sub(window - reduced);
            let end = (pos + window + 1 - reduced).min(sentence.len());
            let context: Vec<usize> = (start..end)
                .filter(|&c| c != pos)
                .map(|c| sentence[c])
                .collect();

            match self.options.algorithm {
                Algorithm::SkipGram => {
                    for ctx in context {
                        loss += self.train_skip_gram(sentence[pos], ctx);
                    }
                }
                Algorithm::Cbow => loss += self.train_cbow(sentence[pos], &context),
            }
        }
        loss
    }

    /// Predict `word` from the vector of `context`.
    fn train_skip_gram(&mut self, word: usize, context: usize) -> f64 {
        let range = self.row(context);
        let mut l1 = std::mem::take(&mut self.neu1);
        l1.copy_from_slice(&self.syn0[range.clone()]);

        let loss = self.train_output(word, &l1);
        self.neu1 = l1;

        let neu1e = std::mem::take(&mut self.neu1e);
        axpy(1.0, &neu1e, &mut self.syn0[range]);
        self.neu1e = neu1e;
        loss
    }

    /// Predict `word` from the sum or mean of its context vectors.
    fn train_cbow(&mut self, word: usize, context: &[usize]) -> f64 {
        if context.is_empty() {
            return 0.0;
        }

        let mut l1 = std::mem::take(&mut self.neu1);
        l1.fill(0.0);
        for &ctx in context {
            axpy(1.0, &self.syn0[self.row(ctx)], &mut l1);
        }
        let inv_count = 1.0 / context.len() as f32;
        if self.options.cbow_mean {
            scale(&mut l1, inv_count);
        }

        let loss = self.train_output(word, &l1);
        self.neu1 = l1;

        let mut neu1e = std::mem::take(&mut self.neu1e);
        if !self.options.cbow_mean {
            // Spread the error over the summed window vectors.
            scale(&mut neu1e, inv_count);
        }
        for &ctx in context {
            let range = self.row(ctx);
            axpy(1.0, &neu1e, &mut self.syn0[range]);
        }
        self.neu1e = neu1e;
        loss
    }

    /// Update output weights for predicting `word` from hidden layer `l1`,
    /// leaving the input-side gradient in `self.neu1e`.
    fn train_output(&mut self, word: usize, l1: &[f32]) -> f64 {
        let alpha = self.alpha;
        let compute_loss = self.options.compute_loss;
        let dim = self.dim;
        let mut loss = 0.0;
        self.neu1e.fill(0.0);

        if self.options.hierarchical_softmax {
            let vocab = self.vocab;
            let entry = &vocab.entries[word];
            for (&code, &point) in entry.code.iter().zip(&entry.point) {
                let range = point as usize * dim..(point as usize + 1) * dim;
                let l2 = &mut self.syn1[range];
                let dot = dot_product(l1, l2);
                let g = (1.0 - code as f32 - sigmoid(dot)) * alpha;
                axpy(g, l2, &mut self.neu1e);
                axpy(g, l1, l2);
                if compute_loss {
                    let sign = if code == 0 { 1.0 } else { -1.0 };
                    loss += neg_log_sigmoid(sign * dot);
                }
            }
        }

        if self.options.negative > 0 {
            for d in 0..=self.options.negative {
                let (target, label) = if d == 0 {
                    (word, 1.0)
                } else {
                    let noise = self.vocab.noise_word(self.rng.gen());
                    if noise == word {
                        continue;
                    }
                    (noise, 0.0)
                };

                let range = target * dim..(target + 1) * dim;
                let l2 = &mut self.syn1neg[range];
                let dot = dot_product(l1, l2);
                let g = (label - sigmoid(dot)) * alpha;
                axpy(g, l2, &mut self.neu1e);
                axpy(g, l1, l2);
                if compute_loss {
                    loss += if label > 0.0 {
                        neg_log_sigmoid(dot)
                    } else {
                        neg_log_sigmoid(-dot)
                    };
                }
            }
        }

        loss
    }
}
