pub mod hits;
pub mod serde;
pub mod shared;
pub mod stats;

use std::{
    collections::{hash_map::Entry, HashMap},
    time::{Duration, Instant},
};

use ::serde::{Deserialize, Serialize};
use ahash::RandomState;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    config::VectorizerConfig,
    error::{Error, Result},
    item::{compose, CombinedDocument, Item},
    recommend::hits::{HitEntry, Hits},
    similarity::{self, SimilarityMatrix},
    vectorizer::{
        tfidf::{DefaultTFIDFEngine, SublinearTFIDFEngine},
        DocumentVector, Vectorizer, Vocabulary,
    },
};

/// What happened during a build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub item_count: usize,
    pub vocabulary_size: usize,
    /// indices of items whose vector is zero
    pub degenerate: Vec<usize>,
    /// titles that appear more than once; queries resolve to the first
    pub duplicate_titles: Vec<String>,
    pub elapsed: Duration,
}

/// A recommended item with its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub item: &'a Item,
    pub index: usize,
    pub score: f64,
}

pub(crate) type TitleIndex = HashMap<String, usize, RandomState>;

/// Fully built, immutable recommendation state.
///
/// Holds the items, the fitted vocabulary, one vector per item, the pairwise
/// similarity matrix and a title lookup table. Nothing in a snapshot changes
/// after construction; a new corpus means a new snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    items: Vec<Item>,
    vocabulary: Vocabulary,
    vectors: Vec<DocumentVector>,
    matrix: SimilarityMatrix,
    title_index: TitleIndex,
    report: BuildReport,
}

/// Map each title to its first position; later duplicates are returned separately.
pub(crate) fn index_titles(items: &[Item]) -> (TitleIndex, Vec<String>) {
    let mut index = TitleIndex::with_capacity_and_hasher(items.len(), RandomState::new());
    let mut duplicates = Vec::new();
    for (pos, item) in items.iter().enumerate() {
        match index.entry(item.title.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(pos);
            }
            Entry::Occupied(first) => {
                warn!(
                    title = %item.title,
                    first = *first.get(),
                    duplicate = pos,
                    "duplicate title, queries resolve to the first occurrence"
                );
                if !duplicates.contains(&item.title) {
                    duplicates.push(item.title.clone());
                }
            }
        }
    }
    (index, duplicates)
}

impl Snapshot {
    /// Vectorize `items` and compute their similarity matrix.
    ///
    /// Item ids are reassigned to their position in `items`.
    ///
    /// # Errors
    /// * `Error::InvalidConfig` - `config` is out of range
    /// * `Error::EmptyCorpus` - `items` is empty
    /// * `Error::NonFiniteSimilarity` - a similarity came out as NaN or infinity
    pub fn build(mut items: Vec<Item>, config: &VectorizerConfig) -> Result<Self> {
        config.validate()?;
        if items.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let start = Instant::now();
        for (id, item) in items.iter_mut().enumerate() {
            item.id = id;
        }

        let documents: Vec<CombinedDocument> = items.par_iter().map(compose).collect();
        let (vocabulary, vectors) = if config.sublinear_tf {
            Vectorizer::<SublinearTFIDFEngine>::from_config(config).fit_transform(&documents)?
        } else {
            Vectorizer::<DefaultTFIDFEngine>::from_config(config).fit_transform(&documents)?
        };
        debug!(terms = vocabulary.len(), "vocabulary fitted");

        let matrix = similarity::compute(&vectors)?;
        let (title_index, duplicate_titles) = index_titles(&items);

        let report = BuildReport {
            item_count: items.len(),
            vocabulary_size: vocabulary.len(),
            degenerate: degenerate_indices(&vectors),
            duplicate_titles,
            elapsed: start.elapsed(),
        };
        info!(
            items = report.item_count,
            vocabulary = report.vocabulary_size,
            degenerate = report.degenerate.len(),
            duplicates = report.duplicate_titles.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "snapshot built"
        );

        Ok(Snapshot {
            items,
            vocabulary,
            vectors,
            matrix,
            title_index,
            report,
        })
    }

    /// Corpus index of the first item titled exactly `title`
    #[inline]
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// The `k` items most similar to the item at `index`, best first.
    ///
    /// The item itself is never included. Equal scores keep ascending corpus
    /// order. `k` larger than the corpus returns every other item.
    ///
    /// # Panics
    /// When `index` is out of range.
    pub fn neighbours(&self, index: usize, k: usize) -> Hits {
        let list = self
            .matrix
            .row(index)
            .into_iter()
            .enumerate()
            .filter(|&(j, _)| j != index)
            .map(|(j, score)| HitEntry { index: j, score })
            .collect();
        let mut hits = Hits::new(list);
        hits.sort_by_score().truncate(k);
        hits
    }

    /// Recommend `k` items similar to the item titled `title`.
    ///
    /// # Errors
    /// * `Error::ItemNotFound` - no item has exactly this title
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation<'_>>> {
        let index = self.index_of(title).ok_or_else(|| Error::ItemNotFound {
            title: title.to_string(),
        })?;
        let hits = self.neighbours(index, k);
        debug!(title, index, returned = hits.len(), "recommendations ranked");
        Ok(hits
            .iter()
            .map(|hit| Recommendation {
                item: &self.items[hit.index],
                index: hit.index,
                score: hit.score,
            })
            .collect())
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn vectors(&self) -> &[DocumentVector] {
        &self.vectors
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    #[inline]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn degenerate_indices(vectors: &[DocumentVector]) -> Vec<usize> {
    vectors
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_zero())
        .map(|(i, _)| i)
        .collect()
}
