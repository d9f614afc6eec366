use tracing::{debug, instrument};

use crate::{
    document::{Document, ScoredDocument},
    embeddings::Embedder,
    ranking::{rank, DEFAULT_LIMIT},
    vector_store::{DocumentStore, InMemoryDocumentStore},
};

/// Embeds documents on insertion and answers top-k similarity queries.
///
/// Nothing is cached between calls: every `retrieve` embeds the query again
/// and scans the whole store.
#[derive(Debug)]
pub struct RetrievalService<S: DocumentStore = InMemoryDocumentStore> {
    embedder: Embedder,
    store: S,
    default_limit: usize,
}

impl RetrievalService<InMemoryDocumentStore> {
    /// Creates a service backed by an empty [`InMemoryDocumentStore`].
    #[must_use]
    pub fn new(embedder: Embedder) -> Self {
        Self::with_store(embedder, InMemoryDocumentStore::new())
    }
}

impl<S: DocumentStore> RetrievalService<S> {
    #[must_use]
    pub fn with_store(embedder: Embedder, store: S) -> Self {
        Self {
            embedder,
            store,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Overrides the limit used by [`Self::retrieve_default`].
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    #[must_use]
    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    #[must_use]
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Embeds `content` and appends it to the store under `id`.
    ///
    /// Content with no known tokens is still stored, with an empty embedding.
    pub async fn add_document(&self, id: impl Into<String>, content: impl Into<String>) {
        self.insert(Document::new(id, content)).await;
    }

    /// Adds every `(id, content)` pair in order.
    pub async fn add_documents<I, K, V>(&self, documents: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (id, content) in documents {
            self.add_document(id, content).await;
        }
    }

    /// Embeds a caller-built document and appends it.
    ///
    /// Any embedding already present on `document` is replaced.
    #[instrument(skip_all, fields(id = %document.id))]
    pub async fn insert(&self, document: Document) {
        let embedding = self.embedder.embed(&document.content);
        if embedding.is_empty() {
            debug!("Document has no known tokens, storing with an empty embedding");
        }
        // embedded before the store lock is taken, so readers never see a partial entry
        self.store.append(document.with_embedding(embedding)).await;
    }

    /// Up to `limit` stored documents most similar to `query`, best first.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn retrieve(&self, query: &str, limit: usize) -> Vec<ScoredDocument> {
        let query_embedding = self.embedder.embed(query);
        let snapshot = self.store.all().await;
        let store_len = snapshot.len();
        let results = rank(&query_embedding, snapshot, limit);
        debug!(store_len, results = results.len(), "Retrieved documents");
        results
    }

    /// [`Self::retrieve`] with the configured default limit.
    pub async fn retrieve_default(&self, query: &str) -> Vec<ScoredDocument> {
        self.retrieve(query, self.default_limit).await
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }
}
