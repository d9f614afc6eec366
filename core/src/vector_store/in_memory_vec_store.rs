use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::DocumentStore;
use crate::document::Document;

/// Flat, in-memory document store guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn append(&self, document: Document) {
        let mut documents = self.documents.write().await;
        documents.push(document);
        debug!(len = documents.len(), "Appended document");
    }

    async fn all(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_append_keeps_insertion_order() {
        let store = InMemoryDocumentStore::new();
        assert!(store.is_empty().await);

        store.append(Document::new("a", "first").with_embedding(vec![1.0])).await;
        store.append(Document::new("b", "second").with_embedding(vec![2.0])).await;
        store.append(Document::new("c", "third").with_embedding(vec![3.0])).await;

        let ids: Vec<_> = store.all().await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_kept() {
        let store = InMemoryDocumentStore::new();
        store.append(Document::new("id", "hello world").with_embedding(vec![1.0])).await;
        store.append(Document::new("id", "shalom world").with_embedding(vec![2.0])).await;

        let all = store.all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "hello world");
        assert_eq!(all[1].content, "shalom world");
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_later_appends() {
        let store = InMemoryDocumentStore::new();
        store.append(Document::new("1", "one").with_embedding(vec![1.0])).await;

        let snapshot = store.all().await;
        store.append(Document::new("2", "two").with_embedding(vec![2.0])).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append(Document::new(i.to_string(), "text").with_embedding(vec![1.0]))
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let all = store.all().await;
        assert_eq!(all.len(), 32);
        assert!(all.iter().all(|d| d.embedding.is_some()));
    }
}
