//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a corpus, building a snapshot or serving queries.
///
/// Build-time variants abort the whole build; `ItemNotFound` is per query and
/// leaves the snapshot untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// Required corpus columns are missing
    #[error("corpus is missing required columns: {}", .missing.join(", "))]
    Schema {
        /// Names of the missing columns, in declaration order
        missing: Vec<String>,
    },

    /// No items were supplied to the build
    #[error("cannot build a snapshot from an empty corpus")]
    EmptyCorpus,

    /// The query title has no exact match
    #[error("book not found in the dataset: {title:?}")]
    ItemNotFound {
        /// The title that was looked up
        title: String,
    },

    /// A similarity value came out as NaN or infinite
    #[error("non-finite similarity at ({row}, {col})")]
    NonFiniteSimilarity {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
    },

    /// A configuration value is out of range
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// A persisted snapshot is inconsistent
    #[error("corrupt snapshot: {message}")]
    CorruptSnapshot {
        /// Description of the inconsistency
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Snapshot encoding or decoding error
    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] serde_cbor::Error),

    /// Configuration extraction error
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Logging could not be initialized
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure
        message: String,
    },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl Error {
    /// True for errors that only affect a single query
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ItemNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_column() {
        let err = Error::Schema {
            missing: vec!["authors".to_string(), "description".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "corpus is missing required columns: authors, description"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn not_found_is_recoverable() {
        let err = Error::ItemNotFound {
            title: "Nonexistent Title".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("Nonexistent Title"));
    }
}
