/// Weighting scheme used by the vectorizer.
///
/// Implementations are stateless; the vectorizer is generic over the engine so
/// the weighting is chosen at compile time for each build path.
pub trait TFIDFEngine {
    /// IDF weight of a term
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// TF weight of a term
    /// # Arguments
    /// * `count` - occurrences of the term in the document
    /// * `term_sum` - total term count of the document
    fn tf(count: u64, term_sum: u64) -> f64;
}

/// Smoothed IDF
/// idf(t) = ln((1 + N) / (1 + df(t))) + 1
#[inline]
fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
    ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

/// Default TF-IDF engine
/// Raw occurrence count as TF, smoothed IDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        smooth_idf(doc_num, doc_freq)
    }

    #[inline]
    fn tf(count: u64, _term_sum: u64) -> f64 {
        count as f64
    }
}

/// Sublinear TF-IDF engine
/// TF is `1 + ln(count)`, which damps terms repeated many times in one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SublinearTFIDFEngine;

impl TFIDFEngine for SublinearTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        smooth_idf(doc_num, doc_freq)
    }

    #[inline]
    fn tf(count: u64, _term_sum: u64) -> f64 {
        if count == 0 {
            0.0
        } else {
            1.0 + (count as f64).ln()
        }
    }
}
