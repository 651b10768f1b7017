use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    vectorizer::DocumentVector,
};

/// Pairwise cosine similarity of every document pair.
///
/// The matrix is symmetric, so only the upper triangle (diagonal included) is
/// stored, row by row. `get(i, j)` and `get(j, i)` read the same slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

/// Number of stored entries for an `n x n` matrix
#[inline]
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

impl SimilarityMatrix {
    /// Rebuild from packed upper-triangle data.
    ///
    /// # Errors
    /// * `Error::CorruptSnapshot` - `data` does not have `packed_len(n)` entries,
    ///   or holds a score outside `[0, 1]`
    pub fn from_packed(n: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != packed_len(n) {
            return Err(Error::CorruptSnapshot {
                message: format!(
                    "similarity matrix for {} items needs {} entries, found {}",
                    n,
                    packed_len(n),
                    data.len()
                ),
            });
        }
        if let Some(pos) = data.iter().position(|s| !(0.0..=1.0).contains(s)) {
            return Err(Error::CorruptSnapshot {
                message: format!(
                    "similarity score {} at packed slot {pos} is out of range",
                    data[pos]
                ),
            });
        }
        Ok(Self { n, data })
    }

    /// Take the packed upper-triangle data, row by row
    pub fn into_packed(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        i * (2 * self.n - i + 1) / 2 + (j - i)
    }

    /// Similarity of items `i` and `j`
    ///
    /// # Panics
    /// When `i` or `j` is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range for {}", self.n);
        self.data[self.offset(i, j)]
    }

    /// Full row `i`, one score per item in corpus order
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Number of items (rows)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Packed upper triangle, row major
    #[inline]
    pub fn packed(&self) -> &[f64] {
        &self.data
    }
}

/// Compute the cosine similarity of every pair of normalized vectors.
///
/// Rows of the upper triangle are computed in parallel. The diagonal is 1.0,
/// or 0.0 for a zero vector. Values are clamped to `[0, 1]`.
///
/// # Errors
/// * `Error::NonFiniteSimilarity` - a pair produced NaN or infinity
pub fn compute(vectors: &[DocumentVector]) -> Result<SimilarityMatrix> {
    let n = vectors.len();
    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let a = &vectors[i];
            let mut row = Vec::with_capacity(n - i);
            row.push(if a.is_zero() { 0.0 } else { 1.0 });
            for (offset, b) in vectors[i + 1..].iter().enumerate() {
                let score = a.dot(b);
                if !score.is_finite() {
                    return Err(Error::NonFiniteSimilarity {
                        row: i,
                        col: i + 1 + offset,
                    });
                }
                row.push(score.clamp(0.0, 1.0));
            }
            Ok(row)
        })
        .collect::<Result<_>>()?;

    let mut data = Vec::with_capacity(packed_len(n));
    for row in rows {
        data.extend(row);
    }
    debug!(items = n, entries = data.len(), "similarity matrix computed");
    Ok(SimilarityMatrix { n, data })
}
