use serde::{Deserialize, Serialize};

/// A text document held by the retrieval store.
///
/// The `id` is supplied by the caller and is never regenerated or checked for
/// uniqueness. `embedding` stays `None` until the document is embedded, which
/// happens exactly once when it is added to a [`crate::retrieval::RetrievalService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f64>>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding: None,
        }
    }

    /// Attaches an embedding, consuming the unembedded document.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f64>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// A document returned from retrieval along with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f64,
}

impl ScoredDocument {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.document.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.document.content
    }
}

/// Joins the contents of ranked documents with single spaces, keeping rank order.
///
/// This is the context string handed to a [`crate::completion::CompletionModel`].
#[must_use]
pub fn build_context(documents: &[ScoredDocument]) -> String {
    documents
        .iter()
        .map(ScoredDocument::content)
        .collect::<Vec<_>>()
        .join(" ")
}
