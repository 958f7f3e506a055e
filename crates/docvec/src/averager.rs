//! Document vectors by averaging word embeddings.
//!
//! Each document becomes the element-wise mean of the vectors of its
//! in-vocabulary tokens. Unknown tokens are skipped, and a document with no
//! known token at all maps to the zero vector instead of failing.

use crate::transformer::Transformer;
use docvec_embeddings::{
    Document, EmbeddingError, EmbeddingResult, EmbeddingTrainer, KeyedVectors, Pretrained,
    Word2Vec, Word2VecOptions, WordVectors,
};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Turns token sequences into fixed-length `f32` feature vectors.
///
/// The averager is untrained after construction and trained after a
/// successful [`fit`](Self::fit) (or when built from pretrained vectors).
/// Transforming in the untrained state is an error.
///
/// # Example
///
/// ```rust
/// use docvec::prelude::*;
///
/// let corpus = vec![vec!["cat", "sat"], vec!["dog", "ran"]];
/// let options = Word2VecOptions::default().with_vector_size(4).with_min_count(1);
///
/// let mut averager = DocumentEmbeddingAverager::new(options);
/// averager.fit(&corpus).unwrap();
///
/// let features = averager.transform(&[vec!["cat", "sat"], vec!["unknown_word"]]).unwrap();
/// assert_eq!(features.dim(), (2, 4));
/// assert!(features.row(1).iter().all(|&x| x == 0.0));
/// ```
pub struct DocumentEmbeddingAverager<T: EmbeddingTrainer = Word2Vec> {
    options: Word2VecOptions,
    trainer: T,
    model: Option<T::Model>,
}

impl DocumentEmbeddingAverager<Word2Vec> {
    /// Create an averager backed by the word2vec trainer.
    pub fn new(options: Word2VecOptions) -> Self {
        Self::with_trainer(options, Word2Vec::new())
    }
}

impl DocumentEmbeddingAverager<Pretrained> {
    /// Create an already-trained averager over pretrained vectors.
    ///
    /// Refitting keeps the same table; the corpus is ignored.
    pub fn from_pretrained(
        options: Word2VecOptions,
        vectors: KeyedVectors,
    ) -> EmbeddingResult<Self> {
        let trainer = Pretrained::new(vectors);
        let model = std::sync::Arc::clone(trainer.vectors());
        Self::with_trainer(options, trainer).with_model(model)
    }
}

impl<T: EmbeddingTrainer> DocumentEmbeddingAverager<T> {
    /// Create an untrained averager backed by any trainer.
    pub fn with_trainer(options: Word2VecOptions, trainer: T) -> Self {
        Self {
            options,
            trainer,
            model: None,
        }
    }

    /// Install an already trained model.
    pub fn with_model(mut self, model: T::Model) -> EmbeddingResult<Self> {
        self.check_dimension(&model)?;
        self.model = Some(model);
        Ok(self)
    }

    /// Train the word model on `documents`, replacing any previous model.
    ///
    /// On error the previous model, if any, stays in place.
    pub fn fit<D: Document>(&mut self, documents: &[D]) -> EmbeddingResult<&mut Self> {
        let model = self.trainer.train(documents, &self.options)?;
        self.check_dimension(&model)?;

        debug!(
            "Fitted on {} documents: {} words, dimension {}",
            documents.len(),
            model.len(),
            model.dimension()
        );
        self.model = Some(model);
        Ok(self)
    }

    /// One row per document, in input order.
    pub fn transform<D: Document>(&self, documents: &[D]) -> EmbeddingResult<Array2<f32>> {
        let model = self.fitted_model()?;
        let dim = self.dimension();

        let mut data = vec![0.0f32; documents.len() * dim];
        if dim > 0 {
            for (doc, row) in documents.iter().zip(data.chunks_mut(dim)) {
                average_into(model, doc, row);
            }
        }
        into_matrix(documents.len(), dim, data)
    }

    /// Same as [`transform`](Self::transform), spread across the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn par_transform<D: Document + Sync>(
        &self,
        documents: &[D],
    ) -> EmbeddingResult<Array2<f32>> {
        use rayon::prelude::*;

        let model = self.fitted_model()?;
        let dim = self.dimension();

        let mut data = vec![0.0f32; documents.len() * dim];
        if dim > 0 {
            data.par_chunks_mut(dim)
                .zip(documents.par_iter())
                .for_each(|(row, doc)| average_into(model, doc, row));
        }
        into_matrix(documents.len(), dim, data)
    }

    /// Fit on `documents`, then transform them.
    pub fn fit_transform<D: Document>(&mut self, documents: &[D]) -> EmbeddingResult<Array2<f32>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// The vector for a single document.
    pub fn embed_document<D: Document + ?Sized>(
        &self,
        document: &D,
    ) -> EmbeddingResult<Array1<f32>> {
        let model = self.fitted_model()?;
        let mut row = vec![0.0f32; self.dimension()];
        average_into(model, document, &mut row);
        Ok(Array1::from_vec(row))
    }

    pub fn options(&self) -> &Word2VecOptions {
        &self.options
    }

    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    /// The trained model, if any.
    pub fn model(&self) -> Option<&T::Model> {
        self.model.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Length of every document vector.
    pub fn dimension(&self) -> usize {
        self.options.vector_size
    }

    fn fitted_model(&self) -> EmbeddingResult<&T::Model> {
        self.model.as_ref().ok_or_else(|| {
            EmbeddingError::ModelNotLoaded("call fit before transform".to_string())
        })
    }

    fn check_dimension(&self, model: &T::Model) -> EmbeddingResult<()> {
        if model.dimension() != self.options.vector_size {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.options.vector_size,
                got: model.dimension(),
            });
        }
        Ok(())
    }
}

impl<T, D> Transformer<D> for DocumentEmbeddingAverager<T>
where
    T: EmbeddingTrainer,
    D: Document,
{
    type Output = Array2<f32>;

    fn fit(&mut self, documents: &[D]) -> EmbeddingResult<&mut Self> {
        DocumentEmbeddingAverager::fit(self, documents)
    }

    fn transform(&self, documents: &[D]) -> EmbeddingResult<Array2<f32>> {
        DocumentEmbeddingAverager::transform(self, documents)
    }
}

impl<T> std::fmt::Debug for DocumentEmbeddingAverager<T>
where
    T: EmbeddingTrainer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentEmbeddingAverager")
            .field("options", &self.options)
            .field("trainer", &self.trainer)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

/// Write the mean of the known-token vectors of `document` into `out`.
///
/// `out` is left as zeros when no token is known.
fn average_into<W, D>(model: &W, document: &D, out: &mut [f32])
where
    W: WordVectors + ?Sized,
    D: Document + ?Sized,
{
    out.fill(0.0);
    let mut known = 0usize;
    for token in document.tokens() {
        if let Some(vector) = model.vector_of(token) {
            for (acc, x) in out.iter_mut().zip(vector) {
                *acc += x;
            }
            known += 1;
        }
    }

    if known > 0 {
        let count = known as f32;
        for acc in out.iter_mut() {
            *acc /= count;
        }
    }
}

fn into_matrix(rows: usize, dim: usize, data: Vec<f32>) -> EmbeddingResult<Array2<f32>> {
    let len = data.len();
    Array2::from_shape_vec((rows, dim), data).map_err(|_| EmbeddingError::DimensionMismatch {
        expected: rows * dim,
        got: len,
    })
}
