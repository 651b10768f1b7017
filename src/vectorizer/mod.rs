pub mod corpus;
pub mod term;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::VectorizerConfig,
    error::{Error, Result},
    utils::math::vector::SparseVec,
    vectorizer::{
        corpus::Corpus,
        term::TermFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::Tokenizer,
    },
};

/// L2-normalized TF-IDF weights of one document, indexed by vocabulary column
pub type DocumentVector = SparseVec<f64>;

/// Column assignment and IDF weight of one vocabulary term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub index: u32,
    pub idf: f64,
    pub doc_freq: u64,
}

/// Terms kept after stop-word removal and frequency thresholds.
///
/// Terms are stored in lexicographic order and the column index of a term is
/// its position, so the same corpus always yields the same columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexMap<Box<str>, TermEntry>,
}

impl Vocabulary {
    /// Select the terms of `corpus` whose document frequency lies in
    /// `[min_df, max_df * doc_num]` and weigh them with `E`.
    pub fn from_corpus<E: TFIDFEngine>(corpus: &Corpus, min_df: u64, max_df: f64) -> Self {
        let doc_num = corpus.get_doc_num();
        let max_count = max_df * doc_num as f64;
        let mut kept: Vec<(&str, u64)> = corpus
            .iter()
            .filter(|&(_, df)| df >= min_df && df as f64 <= max_count)
            .collect();
        kept.par_sort_unstable_by(|a, b| a.0.cmp(b.0));

        let terms = kept
            .into_iter()
            .enumerate()
            .map(|(index, (term, doc_freq))| {
                let entry = TermEntry {
                    index: index as u32,
                    idf: E::idf(doc_num, doc_freq),
                    doc_freq,
                };
                (Box::<str>::from(term), entry)
            })
            .collect();
        Vocabulary { terms }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.terms.get(term).map(|e| e.index)
    }

    #[inline]
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|e| e.idf)
    }

    /// Term stored in column `index`
    #[inline]
    pub fn term_at(&self, index: u32) -> Option<&str> {
        self.terms.get_index(index as usize).map(|(t, _)| &**t)
    }

    /// `(term, entry)` in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermEntry)> {
        self.terms.iter().map(|(t, e)| (&**t, e))
    }

    /// Weigh one document against this vocabulary and L2-normalize it.
    /// Terms outside the vocabulary are ignored.
    pub fn vectorize<E: TFIDFEngine>(&self, freq: &TermFrequency) -> DocumentVector {
        let term_sum = freq.term_sum();
        let (inds, vals): (Vec<u32>, Vec<f64>) = freq
            .iter()
            .filter_map(|(term, count)| {
                self.terms
                    .get(term)
                    .map(|e| (e.index, E::tf(count, term_sum) * e.idf))
            })
            .unzip();
        let mut vec = SparseVec::from_parts(inds, vals);
        vec.l2_normalize();
        vec
    }
}

/// TF-IDF vectorizer
///
/// Tokenizes documents, counts document frequencies, fixes the vocabulary and
/// produces one normalized sparse vector per document.
/// The weighting is selected with `E` (e.g. `DefaultTFIDFEngine`).
#[derive(Debug, Clone)]
pub struct Vectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    tokenizer: Tokenizer,
    min_df: u64,
    max_df: f64,
    _marker: PhantomData<E>,
}

impl<E> Default for Vectorizer<E>
where
    E: TFIDFEngine,
{
    fn default() -> Self {
        Self::new(Tokenizer::default(), 1, 1.0)
    }
}

impl<E> Vectorizer<E>
where
    E: TFIDFEngine,
{
    pub fn new(tokenizer: Tokenizer, min_df: u64, max_df: f64) -> Self {
        Self {
            tokenizer,
            min_df,
            max_df,
            _marker: PhantomData,
        }
    }

    /// Build from configuration. `sublinear_tf` is not read here, it picks `E`.
    pub fn from_config(config: &VectorizerConfig) -> Self {
        Self::new(
            Tokenizer::new(config.lowercase, config.stop_words),
            config.min_df,
            config.max_df,
        )
    }

    /// Fit the vocabulary on `documents` and return the vector of each one,
    /// in input order.
    ///
    /// A document without any vocabulary term yields a zero vector; it is
    /// logged but never an error.
    ///
    /// # Errors
    /// * `Error::EmptyCorpus` - `documents` is empty
    pub fn fit_transform<S>(&self, documents: &[S]) -> Result<(Vocabulary, Vec<DocumentVector>)>
    where
        S: AsRef<str> + Sync,
        E: Sync,
    {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let freqs: Vec<TermFrequency> = documents
            .par_iter()
            .map(|doc| self.tokenizer.term_frequency(doc.as_ref()))
            .collect();

        let corpus = freqs
            .par_iter()
            .fold(Corpus::new, |mut corpus, freq| {
                corpus.add_doc(freq);
                corpus
            })
            .reduce(Corpus::new, Corpus::merge_corpus);
        debug!(
            documents = corpus.get_doc_num(),
            distinct_terms = corpus.vocab_size(),
            "document frequencies counted"
        );

        let vocabulary = Vocabulary::from_corpus::<E>(&corpus, self.min_df, self.max_df);
        if vocabulary.is_empty() {
            warn!("vocabulary is empty, every document vector will be zero");
        }

        let vectors: Vec<DocumentVector> = freqs
            .par_iter()
            .map(|freq| vocabulary.vectorize::<E>(freq))
            .collect();

        for (index, vec) in vectors.iter().enumerate() {
            if vec.is_zero() {
                warn!(index, "document has no vocabulary terms, vector is zero");
            }
        }
        debug!(vocabulary = vocabulary.len(), "documents vectorized");
        Ok((vocabulary, vectors))
    }
}
