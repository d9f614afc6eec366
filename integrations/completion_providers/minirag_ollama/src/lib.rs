use async_trait::async_trait;
use minirag::completion::{CompletionError, CompletionModel};
use minirag::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const URL_ENV_VAR: &str = "MINIRAG_OLLAMA_URL";
const URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ModelConfig {
    api_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

/// Implementation of minirag's `CompletionModel` trait for an [Ollama](https://ollama.com)
/// `/api/generate` endpoint.
///
/// # Supported Configuration
///
/// - `model`: name of the model to run, `llama3.2` by default
/// - `api_url`: full url of the generate endpoint. Falls back to the
///   `MINIRAG_OLLAMA_URL` env var, then to `http://localhost:11434/api/generate`
/// - `timeout_secs`: transport level timeout for a single request
///
/// All of them are optional so the config can be left out altogether.
///
/// # Examples
///
/// ```rust,no_run
/// use minirag_ollama::OllamaCompletionModel;
///
/// let model = OllamaCompletionModel::new(Some(r#"{
///     "model": "llama3.2",
///     "api_url": "http://localhost:11434/api/generate"
/// }"#)).unwrap();
/// ```
pub struct OllamaCompletionModel {
    api_url: String,
    client: reqwest::Client,
    model: String,
}

impl OllamaCompletionModel {
    /// Creates a new `OllamaCompletionModel` from an optional json config.
    ///
    /// # Errors
    /// Fails if the json is malformed, contains unknown fields, or the http
    /// client can't be built.
    #[instrument]
    pub fn new(json_config: Option<&str>) -> Result<Self, ConfigError> {
        let config = match json_config {
            Some(json) => serde_json::from_str::<ModelConfig>(json).map_err(|e| {
                error!(error = %e, "Failed to deserialize json config");
                ConfigError::Parse(e)
            })?,
            None => ModelConfig::default(),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to build http client: {e}")))?;

        Ok(Self {
            api_url: resolve_url(config.api_url, std::env::var(URL_ENV_VAR).ok()),
            client,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

fn resolve_url(configured: Option<String>, from_env: Option<String>) -> String {
    configured
        .or(from_env)
        .unwrap_or_else(|| URL.to_string())
}

fn build_prompt(context: &str, query: &str) -> String {
    format!("Context: {context}\n\nQuestion: {query}\nAnswer:")
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl CompletionModel for OllamaCompletionModel {
    #[instrument(skip(self, context, query), fields(model = %self.model, context_len = context.len()))]
    async fn generate(&self, context: &str, query: &str) -> Result<String, CompletionError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(context, query),
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Request failed");
                CompletionError::RequestError(e.to_string())
            })?;

        let status = response.status();
        debug!(%status, "Received API response");

        if status.is_success() {
            let body = response.json::<GenerateResponse>().await.map_err(|e| {
                error!(error = ?e, "Failed to parse response JSON");
                CompletionError::ParseError(e.to_string())
            })?;
            Ok(body.response)
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(%status, error_message, "Provider returned an error");
            Err(CompletionError::ProviderError(status.as_u16(), error_message))
        }
    }
}
