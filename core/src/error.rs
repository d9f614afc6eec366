use crate::{
    completion::CompletionError, config::ConfigError, embeddings::model::TableError,
    embeddings::EmbedderError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Completion error")]
    Completion(#[from] CompletionError),
    #[error("Embedder error")]
    Embedder(#[from] EmbedderError),
    #[error("Word vector table error")]
    Table(#[from] TableError),
    #[error("Config error")]
    Config(#[from] ConfigError),
}
