use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

use crate::{embeddings::Embedder, error::Error, ranking::DEFAULT_LIMIT, retrieval::RetrievalService};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to deserialize json config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for assembling a retrieval pipeline, read from a json string.
///
/// ```json
/// {
///   "word_vectors": "/data/glove.6B.50d.txt",
///   "default_limit": 3,
///   "generation_timeout_secs": 30
/// }
/// ```
/// Every field is optional; unknown fields are rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct RagConfig {
    pub word_vectors: Option<PathBuf>,
    pub default_limit: usize,
    pub generation_timeout_secs: u64,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            word_vectors: None,
            default_limit: DEFAULT_LIMIT,
            generation_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RagConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.generation_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "`generation_timeout_secs` must be greater than 0".to_string(),
            ));
        }
        Ok(config)
    }

    #[must_use]
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Loads the configured word vectors and creates an empty [`RetrievalService`].
    pub fn build_retrieval(&self) -> Result<RetrievalService, Error> {
        let path = self
            .word_vectors
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("`word_vectors` path is required".to_string()))?;
        let embedder = Embedder::from_path(path)?;
        Ok(RetrievalService::new(embedder).with_default_limit(self.default_limit))
    }
}
