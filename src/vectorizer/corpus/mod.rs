use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Document frequencies of a corpus.
/// Keeps the number of documents and, per term, how many documents contain it.
/// It is the base data for IDF calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    doc_num: u64,
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Count the distinct terms of one document
    pub fn add_set<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.doc_num += 1;
        for term in terms {
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Add a document from its term frequency
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.add_set(freq.term_set());
    }

    /// Merge another corpus into self
    pub fn merge_corpus(mut self, other: Corpus) -> Self {
        self.doc_num += other.doc_num;
        for (term, count) in other.term_counts {
            *self.term_counts.entry(term).or_insert(0) += count;
        }
        self
    }

    /// Number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// `(term, document frequency)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(t, &c)| (&**t, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_document_once_per_term() {
        let mut corpus = Corpus::new();
        corpus.add_doc(&TermFrequency::from(&["dune", "dune", "sand"][..]));
        corpus.add_doc(&TermFrequency::from(&["sand", "spice"][..]));
        assert_eq!(corpus.get_doc_num(), 2);
        assert_eq!(corpus.get_term_count("dune"), 1);
        assert_eq!(corpus.get_term_count("sand"), 2);
        assert_eq!(corpus.get_term_count("missing"), 0);
        assert_eq!(corpus.vocab_size(), 3);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Corpus::new();
        a.add_set(["x", "y"]);
        let mut b = Corpus::new();
        b.add_set(["y", "z"]);
        b.add_set(std::iter::empty());
        let merged = a.merge_corpus(b);
        assert_eq!(merged.get_doc_num(), 3);
        assert_eq!(merged.get_term_count("y"), 2);
        assert_eq!(merged.vocab_size(), 3);
    }
}
