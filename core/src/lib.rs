//! # minirag - Core API Documentation
//!
//! minirag is a small retrieval-augmented generation core. It stores short text
//! documents, embeds them by averaging pretrained word vectors, and retrieves the
//! documents most similar to a query so they can be handed to a text generation
//! backend as context.
//!
//! ## Components
//!
//! - **Word vectors**: a token to vector table, loaded from GloVe/word2vec text files or
//!   provided through the [`embeddings::model::WordVectors`] trait
//! - **Embedder**: averages the vectors of every known token in a text
//! - **Document store**: append-only, insertion ordered, safe to share between tasks
//! - **Ranking**: cosine similarity with a stable, bounded top-k selection
//! - **Retrieval service**: embeds on insert, ranks on query
//! - **Client**: feeds retrieved context to a [`completion::CompletionModel`] under a timeout
//!
//! ## Example
//!
//! ```rust,no_run
//! use minirag::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let service = RetrievalService::new(Embedder::from_path("glove.6B.50d.txt")?);
//!
//!     service.add_document("1", "Swift is a programming language").await;
//!     service.add_document("2", "Python is great for data science").await;
//!
//!     for hit in service.retrieve("What language is good for apps?", 1).await {
//!         println!("{} ({:.3}): {}", hit.id(), hit.score, hit.content());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Nothing here is global: every service owns its store, and several services
//! can share one word vector table through an `Arc`.

/// Generation backend contract and the retrieval-to-generation client
pub mod completion;

/// Json configuration for assembling a pipeline
pub mod config;

/// Document and scored result types
pub mod document;

/// Word vector tables and the averaging embedder
pub mod embeddings;

/// Error types for all library operations
pub mod error;

/// Convenience prelude exports
pub mod prelude;

/// Cosine similarity and top-k selection
pub mod ranking;

/// Embed-on-insert, rank-on-query service
pub mod retrieval;

/// Document storage
pub mod vector_store;
