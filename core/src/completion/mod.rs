use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    document::{build_context, ScoredDocument},
    retrieval::RetrievalService,
    vector_store::DocumentStore,
};

/// Default bound on a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompletionError {
    #[error("Provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Text generation backend that answers a query given retrieved context.
///
/// Prompt templating and the wire protocol belong to the implementation;
/// the retrieval side only hands over the context and the query.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn generate(&self, context: &str, query: &str) -> Result<String, CompletionError>;
}

/// Answer produced by [`Client::ask`] together with the documents used as context.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredDocument>,
}

/// Wires a [`RetrievalService`] to a [`CompletionModel`].
///
/// Each call retrieves the top documents, joins them into a context string and
/// sends it to the model. Generation is bounded by a timeout; failures are
/// returned as is, without retries.
pub struct Client<M: CompletionModel, S: DocumentStore = crate::vector_store::InMemoryDocumentStore> {
    retrieval: Arc<RetrievalService<S>>,
    completion_model: M,
    limit: usize,
    timeout: Duration,
}

impl<M: CompletionModel, S: DocumentStore> Client<M, S> {
    pub fn new(retrieval: Arc<RetrievalService<S>>, completion_model: M) -> Self {
        let limit = retrieval.default_limit();
        Self {
            retrieval,
            completion_model,
            limit,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Number of documents retrieved per question, [`crate::ranking::DEFAULT_LIMIT`] unless
    /// the service was configured otherwise.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn retrieval(&self) -> &Arc<RetrievalService<S>> {
        &self.retrieval
    }

    /// Retrieves context for `query` and asks the model for an answer.
    #[instrument(skip(self, query), fields(limit = self.limit))]
    pub async fn ask(&self, query: &str) -> Result<Answer, CompletionError> {
        let sources = self.retrieval.retrieve(query, self.limit).await;
        let context = build_context(&sources);
        debug!(sources = sources.len(), context_len = context.len(), "Built context");

        let text = tokio::time::timeout(
            self.timeout,
            self.completion_model.generate(&context, query),
        )
        .await
        .map_err(|_| CompletionError::Timeout(self.timeout))??;

        Ok(Answer { text, sources })
    }
}

impl<M: CompletionModel, S: DocumentStore> std::fmt::Debug for Client<M, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
