//! Pipeline-facing transformer contract.

use docvec_embeddings::{Document, EmbeddingResult};

/// A fit/transform stage in a feature pipeline.
///
/// Fitting learns state from a corpus; transforming maps documents to
/// features using that state. Labels are not part of the contract: stages
/// that don't need them are fitted the same way in supervised and
/// unsupervised pipelines.
pub trait Transformer<D: Document> {
    /// Feature output of [`transform`](Transformer::transform).
    type Output;

    /// Fits the transformer to a corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, documents: &[D]) -> EmbeddingResult<&mut Self>;

    /// Transforms documents using fitted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformer is not fitted.
    fn transform(&self, documents: &[D]) -> EmbeddingResult<Self::Output>;

    /// Fits and transforms in one step.
    fn fit_transform(&mut self, documents: &[D]) -> EmbeddingResult<Self::Output> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvec_embeddings::EmbeddingError;

    /// Counts tokens per document once fitted.
    struct TokenCounter {
        fitted: bool,
    }

    impl Transformer<Vec<&'static str>> for TokenCounter {
        type Output = Vec<usize>;

        fn fit(&mut self, _documents: &[Vec<&'static str>]) -> EmbeddingResult<&mut Self> {
            self.fitted = true;
            Ok(self)
        }

        fn transform(&self, documents: &[Vec<&'static str>]) -> EmbeddingResult<Vec<usize>> {
            if !self.fitted {
                return Err(EmbeddingError::ModelNotLoaded("not fitted".to_string()));
            }
            Ok(documents.iter().map(|d| d.token_count()).collect())
        }
    }

    #[test]
    fn test_fit_transform_default() {
        let docs = vec![vec!["a", "b"], vec![]];
        let mut counter = TokenCounter { fitted: false };

        assert!(counter.transform(&docs).is_err());
        assert_eq!(counter.fit_transform(&docs).unwrap(), vec![2, 0]);
    }
}
