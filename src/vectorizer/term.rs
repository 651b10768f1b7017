use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how many times each term appears in one document.
/// Terms keep their first-appearance order, so iteration is deterministic.
///
/// # Examples
/// ```
/// use book_recommender::vectorizer::term::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("spice");
/// term_freq.add_term("desert");
/// term_freq.add_term("spice");
///
/// assert_eq!(term_freq.term_count("spice"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<Box<str>, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.into(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate `(term, count)` in first-appearance order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (&**term, count))
    }

    /// Distinct terms of this document
    #[inline]
    pub fn term_set(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|term| &**term)
    }

    /// Occurrence count of a term, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of terms, duplicates included
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn len(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_order() {
        let tf = TermFrequency::from(&["b", "a", "b", "c", "b"][..]);
        assert_eq!(tf.term_count("b"), 3);
        assert_eq!(tf.term_count("zzz"), 0);
        assert_eq!(tf.term_sum(), 5);
        assert_eq!(tf.len(), 3);
        assert_eq!(tf.term_set().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert!(tf.contains_term("c"));
    }

    #[test]
    fn empty() {
        let tf = TermFrequency::new();
        assert!(tf.is_empty());
        assert_eq!(tf.term_sum(), 0);
        assert_eq!(tf.iter().count(), 0);
    }
}
