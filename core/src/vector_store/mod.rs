mod in_memory_vec_store;

use async_trait::async_trait;

use crate::document::Document;

pub use in_memory_vec_store::InMemoryDocumentStore;

/// Append-only storage for embedded documents.
///
/// Implementations keep insertion order and never deduplicate by id. `all`
/// must return a consistent snapshot: a concurrent `append` is either fully
/// visible or not visible at all.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn append(&self, document: Document);

    async fn all(&self) -> Vec<Document>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
