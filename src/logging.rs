//! Logging setup for the command line front-end
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the binary.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{
    config::LoggingConfig,
    error::{Error, Result},
};

/// Environment variable holding a filter directive, e.g. `book_recommender=debug`
pub const LOG_ENV: &str = "RECOMMENDER_LOG";

/// Filter from `RECOMMENDER_LOG`, or from the configured level when unset
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => parse_filter(&directives),
        _ => parse_filter(&config.level),
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| Error::Logging {
        message: format!("invalid log filter {directives:?}: {e}"),
    })
}

/// Install the global fmt subscriber writing to stderr.
///
/// # Errors
/// * `Error::Logging` - the filter does not parse or a subscriber is already set
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_parses() {
        let config = LoggingConfig {
            level: "book_recommender=debug,warn".to_string(),
        };
        assert!(parse_filter(&config.level).is_ok());
    }

    #[test]
    fn bad_level_is_a_logging_error() {
        assert!(matches!(
            parse_filter("book_recommender=loud"),
            Err(Error::Logging { .. })
        ));
    }
}
