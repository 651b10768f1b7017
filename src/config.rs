//! Runtime configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `RECOMMENDER_` environment variables (`__` separates nested keys, e.g.
//! `RECOMMENDER_VECTORIZER__MIN_DF=2`).

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RECOMMENDER_";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vectorizer: VectorizerConfig,
    pub recommender: RecommenderConfig,
    pub logging: LoggingConfig,
}

/// Stop-word set applied by the tokenizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    English,
    None,
}

/// Vocabulary and weighting options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub stop_words: StopWords,
    pub lowercase: bool,
    /// drop terms found in fewer documents than this
    pub min_df: u64,
    /// drop terms found in more than this fraction of documents
    pub max_df: f64,
    /// use `1 + ln(tf)` instead of the raw count
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::English,
            lowercase: true,
            min_df: 1,
            max_df: 1.0,
            sublinear_tf: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub top_k: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and the environment.
    ///
    /// # Errors
    /// * `Error::InvalidConfig` - `path` is given but no such file exists, or a
    ///   value is out of range
    /// * `Error::Config` - a layer cannot be parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            if !path.is_file() {
                warn!(path = %path.display(), "configuration file not found");
                return Err(Error::InvalidConfig {
                    message: format!("configuration file {} does not exist", path.display()),
                });
            }
            debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_df == 0 {
            return Err(Error::InvalidConfig {
                message: "vectorizer.min_df must be at least 1".to_string(),
            });
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::InvalidConfig {
                message: format!("vectorizer.max_df must be in (0, 1], got {}", self.max_df),
            });
        }
        Ok(())
    }
}
