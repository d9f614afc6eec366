pub use crate::completion::{Answer, Client, CompletionError, CompletionModel};
pub use crate::config::RagConfig;
pub use crate::document::{build_context, Document, ScoredDocument};
pub use crate::embeddings::model::{WordVectorTable, WordVectors};
pub use crate::embeddings::Embedder;
pub use crate::error::Error;
pub use crate::ranking::{cosine_similarity, rank, DEFAULT_LIMIT};
pub use crate::retrieval::RetrievalService;
pub use crate::vector_store::{DocumentStore, InMemoryDocumentStore};
