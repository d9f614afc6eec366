pub mod model;

use std::path::Path;
use std::sync::Arc;

use model::{TableError, WordVectorTable, WordVectors};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum EmbedderError {
    #[error("Word vector table unavailable: {0}")]
    TableUnavailable(#[from] TableError),
    #[error("Word vector table has dimension 0")]
    ZeroDimension,
}

/// Turns text into a dense vector by averaging per-token word vectors.
///
/// Tokens are split on whitespace and looked up verbatim, without casing or
/// punctuation normalisation. Out-of-vocabulary tokens are dropped. When no
/// token survives, `embed` returns an empty vector, which ranks with similarity 0.
#[derive(Clone)]
pub struct Embedder {
    table: Arc<dyn WordVectors>,
}

impl std::fmt::Debug for Embedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Embedder")
            .field("dimension", &self.table.dimension())
            .finish()
    }
}

impl Embedder {
    /// Wraps a loaded table. Fails if the table reports dimension 0.
    pub fn new(table: Arc<dyn WordVectors>) -> Result<Self, EmbedderError> {
        if table.dimension() == 0 {
            return Err(EmbedderError::ZeroDimension);
        }
        Ok(Self { table })
    }

    /// Loads a [`WordVectorTable`] from `path` and wraps it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EmbedderError> {
        let table = WordVectorTable::load(path)?;
        Self::new(Arc::new(table))
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// Component-wise mean of the vectors of every known token in `text`.
    #[must_use]
    pub fn embed(&self, text: &str) -> Vec<f64> {
        let dimension = self.table.dimension();
        let mut vectors: Vec<&[f64]> = Vec::new();
        let mut dropped = 0usize;

        for token in text.split_whitespace() {
            let Some(vector) = self.table.lookup(token) else {
                dropped += 1;
                continue;
            };
            if vector.len() != dimension {
                warn!(
                    token,
                    expected = dimension,
                    found = vector.len(),
                    "Word vector has the wrong dimension, skipping token"
                );
                dropped += 1;
                continue;
            }
            vectors.push(vector);
        }

        if vectors.is_empty() {
            debug!(dropped, "No known tokens, returning empty embedding");
            return Vec::new();
        }
        if dropped > 0 {
            debug!(found = vectors.len(), dropped, "Dropped out-of-vocabulary tokens");
        }

        // divide before summing so large components can't overflow
        let n = vectors.len() as f64;
        let mut mean = vec![0.0; dimension];
        for vector in vectors {
            for (acc, v) in mean.iter_mut().zip(vector) {
                *acc += v / n;
            }
        }
        mean
    }
}
