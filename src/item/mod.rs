pub mod loader;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns every corpus must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "authors", "categories", "description"];

/// Passthrough rating column, optional
pub const RATING_COLUMN: &str = "average_rating";

/// A recommendable book.
///
/// `id` is the position in the corpus and is reassigned when a snapshot is built.
/// `average_rating` is carried for display only and never feeds similarity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: usize,
    pub title: String,
    pub authors: String,
    pub categories: String,
    pub description: String,
    pub average_rating: Option<f64>,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        categories: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Item {
            id: 0,
            title: title.into(),
            authors: authors.into(),
            categories: categories.into(),
            description: description.into(),
            average_rating: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.average_rating = Some(rating);
        self
    }
}

/// The text the vectorizer sees for one item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombinedDocument(String);

impl CombinedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CombinedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombinedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join categories, authors and description with a single space, in that order.
/// Empty fields stay as empty strings so the layout never changes.
pub fn compose(item: &Item) -> CombinedDocument {
    let mut doc = String::with_capacity(
        item.categories.len() + item.authors.len() + item.description.len() + 2,
    );
    doc.push_str(&item.categories);
    doc.push(' ');
    doc.push_str(&item.authors);
    doc.push(' ');
    doc.push_str(&item.description);
    CombinedDocument(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_joined_in_fixed_order() {
        let item = Item::new("Dune", "Frank Herbert", "Fiction", "Desert planet politics");
        assert_eq!(
            compose(&item).as_str(),
            "Fiction Frank Herbert Desert planet politics"
        );
    }

    #[test]
    fn empty_fields_keep_separators() {
        let item = Item::new("Untitled", "", "Poetry", "");
        assert_eq!(compose(&item).as_str(), "Poetry  ");
        assert_eq!(compose(&Item::default()).as_str(), "  ");
    }

    #[test]
    fn title_and_rating_are_not_part_of_the_document() {
        let item = Item::new("Emma", "Jane Austen", "Classics", "Matchmaking").with_rating(4.1);
        let doc = compose(&item);
        assert!(!doc.as_str().contains("Emma"));
        assert!(!doc.as_str().contains("4.1"));
    }
}
