use std::fmt::Debug;

/// One ranked neighbour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    /// corpus index of the neighbour
    pub index: usize,
    /// cosine similarity to the query item
    pub score: f64,
}

/// Ranked neighbours of a query item
#[derive(Clone, Default, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score.
    /// The sort is stable, so equal scores keep their current order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|e| !e.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep the first `k` entries
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> {
        self.list.iter()
    }

    /// Corpus indices in rank order
    pub fn indices(&self) -> Vec<usize> {
        self.list.iter().map(|e| e.index).collect()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for entry in &self.list {
                writeln!(f, "    #{}: {:.6}", entry.index, entry.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}
