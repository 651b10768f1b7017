use std::{collections::HashSet, fmt};

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::recommend::Snapshot;

/// Summary numbers for a built corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub item_count: usize,
    /// distinct non-empty author strings
    pub unique_authors: usize,
    pub vocabulary_size: usize,
    pub degenerate_count: usize,
    pub duplicate_title_count: usize,
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total books in database: {}", self.item_count)?;
        writeln!(f, "Number of unique authors: {}", self.unique_authors)?;
        writeln!(f, "Vocabulary size: {}", self.vocabulary_size)?;
        writeln!(f, "Books without usable text: {}", self.degenerate_count)?;
        write!(f, "Duplicated titles: {}", self.duplicate_title_count)
    }
}

impl Snapshot {
    pub fn stats(&self) -> CorpusStats {
        let authors: HashSet<&str, RandomState> = self
            .items
            .iter()
            .map(|item| item.authors.as_str())
            .filter(|a| !a.is_empty())
            .collect();
        CorpusStats {
            item_count: self.items.len(),
            unique_authors: authors.len(),
            vocabulary_size: self.vocabulary.len(),
            degenerate_count: self.report.degenerate.len(),
            duplicate_title_count: self.report.duplicate_titles.len(),
        }
    }

    /// Every title in alphabetical order, duplicates included
    pub fn sorted_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.items.iter().map(|i| i.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }
}
