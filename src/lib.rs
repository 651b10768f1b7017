//! Content-based book recommender.
//!
//! Each book's categories, authors and description are turned into a TF-IDF
//! vector; every pair of books is compared by cosine similarity once, and
//! queries rank the precomputed row of the chosen book.
//!
//! ```
//! use book_recommender::{Item, Snapshot, VectorizerConfig};
//!
//! let books = vec![
//!     Item::new("Dune", "Frank Herbert", "Science Fiction", "Desert planet spice empire"),
//!     Item::new("Dune Messiah", "Frank Herbert", "Science Fiction", "Spice empire prophet"),
//!     Item::new("Emma", "Jane Austen", "Classics", "Matchmaking in Highbury"),
//! ];
//! let snapshot = Snapshot::build(books, &VectorizerConfig::default()).unwrap();
//! let recs = snapshot.recommend("Dune", 1).unwrap();
//! assert_eq!(recs[0].item.title, "Dune Messiah");
//! ```
pub mod config;
pub mod error;
pub mod item;
pub mod logging;
pub mod recommend;
pub mod similarity;
pub mod utils;
pub mod vectorizer;

/// Immutable recommendation state
/// Holds the items, the fitted vocabulary, the document vectors, the pairwise
/// similarity matrix and the title lookup table.
///
/// # Serialization
/// Supported through `save`, written as CBOR without the title index.
///
/// # Deserialization
/// Supported through `load` or `SnapshotData`, which rebuilds the title index
/// and checks the parts against each other.
pub use recommend::Snapshot;

/// Serializable form of `Snapshot` without derived lookup tables
pub use recommend::serde::SnapshotData;

/// Atomically replaceable handle to the live snapshot
pub use recommend::shared::SharedSnapshot;

pub use recommend::{hits::Hits, stats::CorpusStats, BuildReport, Recommendation};

/// A recommendable book and the text composed from it
pub use item::{compose, CombinedDocument, Item};

/// Configuration sections
pub use config::{Config, StopWords, VectorizerConfig};

pub use error::{Error, Result};

/// TF-IDF Vectorizer
/// Fits a vocabulary on a document collection and produces one L2-normalized
/// sparse vector per document.
///
/// `Vectorizer<E>` is generic over the weighting engine `E`
/// (`DefaultTFIDFEngine` or `SublinearTFIDFEngine`).
pub use vectorizer::{DocumentVector, Vectorizer, Vocabulary};

/// TF-IDF weighting engines
pub use vectorizer::tfidf::{DefaultTFIDFEngine, SublinearTFIDFEngine, TFIDFEngine};

pub use similarity::SimilarityMatrix;
