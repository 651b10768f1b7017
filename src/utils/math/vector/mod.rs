use std::cmp::Ordering;

use num::Num;
use serde::{Deserialize, Serialize};

use crate::utils::sort::radix_sort_by_index;

/// SparseVec is a sparse vector that only stores non-zero entries.
/// It holds `inds` and `vals` as two parallel arrays (SoA),
/// `inds` keeps the column index of each entry and
/// `vals` keeps the value of that entry.
///
/// Entries are guaranteed to be sorted by ascending index without duplicates,
/// so two vectors can be combined with a single merge pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N = f64>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> Default for SparseVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from unordered `(index, value)` columns.
    /// Zero values are dropped, indices are sorted, and duplicate indices are summed.
    ///
    /// # Arguments
    /// * `inds` - column indices
    /// * `vals` - values, same length as `inds`
    pub fn from_parts(mut inds: Vec<u32>, mut vals: Vec<N>) -> Self {
        radix_sort_by_index(&mut inds, &mut vals);
        let mut out = SparseVec {
            inds: Vec::with_capacity(inds.len()),
            vals: Vec::with_capacity(vals.len()),
        };
        for (ind, val) in inds.into_iter().zip(vals) {
            if out.inds.last() == Some(&ind) {
                if let Some(last) = out.vals.last_mut() {
                    *last = *last + val;
                }
            } else {
                out.inds.push(ind);
                out.vals.push(val);
            }
        }
        out.drop_zeros();
        out
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for i in 0..self.inds.len() {
            if !self.vals[i].is_zero() {
                self.inds[keep] = self.inds[i];
                self.vals[keep] = self.vals[i];
                keep += 1;
            }
        }
        self.inds.truncate(keep);
        self.vals.truncate(keep);
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// number of non-zero entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when the vector has no non-zero entry
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn get(&self, index: u32) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// iterate `(index, value)` in ascending index order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    /// `true` when indices and values pair up and indices strictly ascend.
    /// Deserialized vectors must pass this before `dot` can trust them.
    pub fn is_well_formed(&self) -> bool {
        self.inds.len() == self.vals.len() && self.inds.windows(2).all(|w| w[0] < w[1])
    }
}

impl<N> SparseVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product with f64 accumulation.
    /// d(a, b) = Σ(a_i * b_i)
    pub fn dot(&self, other: &Self) -> f64 {
        let (a_inds, b_inds) = (&self.inds, &other.inds);
        let mut i = 0;
        let mut j = 0;
        let mut sum = 0.0_f64;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    sum += self.vals[i].into() * other.vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        sum
    }

    /// ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn norm(&self) -> f64 {
        self.vals
            .iter()
            .map(|&v| {
                let v: f64 = v.into();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl SparseVec<f64> {
    /// Divide every entry by the Euclidean norm.
    /// A zero vector is left untouched.
    ///
    /// # Returns
    /// * `bool` - false when the vector was zero and could not be normalized
    pub fn l2_normalize(&mut self) -> bool {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return false;
        }
        self.vals.iter_mut().for_each(|v| *v /= norm);
        true
    }
}
