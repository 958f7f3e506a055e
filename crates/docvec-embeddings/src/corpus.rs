//! Tokenized documents.
//!
//! Tokenization happens upstream; a document here is already an ordered
//! sequence of tokens and is only ever read.

/// An ordered sequence of tokens.
///
/// Implemented for the usual owned and borrowed token containers, so both
/// `Vec<String>` corpora and `&[&str]` literals can be passed directly.
pub trait Document {
    /// Iterate over the tokens in order.
    fn tokens(&self) -> impl Iterator<Item = &str>;

    /// Number of tokens, known or not.
    fn token_count(&self) -> usize {
        self.tokens().count()
    }
}

impl<S: AsRef<str>> Document for [S] {
    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::as_ref)
    }

    fn token_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>> Document for Vec<S> {
    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::as_ref)
    }

    fn token_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>, const N: usize> Document for [S; N] {
    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::as_ref)
    }

    fn token_count(&self) -> usize {
        N
    }
}

impl<D: Document + ?Sized> Document for &D {
    fn tokens(&self) -> impl Iterator<Item = &str> {
        (**self).tokens()
    }

    fn token_count(&self) -> usize {
        (**self).token_count()
    }
}

/// Total number of raw tokens across a corpus.
pub fn corpus_token_count<D: Document>(corpus: &[D]) -> u64 {
    corpus.iter().map(|doc| doc.token_count() as u64).sum()
}
