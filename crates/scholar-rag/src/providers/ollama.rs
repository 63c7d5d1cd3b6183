//! Ollama-backed providers for embeddings and chat completion
//!
//! Speaks the local Ollama HTTP API: `/api/embeddings` for vectors,
//! `/api/chat` for replies, and `/api/pull` (an NDJSON stream) to load
//! models while reporting download progress.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::{GenerationOptions, LlmConfig};
use crate::error::{Error, Result};
use crate::types::ConversationTurn;

use super::completion::{CompletionProvider, InitProgress};
use super::embedding::EmbeddingProvider;

/// Shared Ollama HTTP client with bounded retry
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ConversationTurn>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize, Clone, Copy)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Serialize)]
struct PullRequest {
    name: String,
    stream: bool,
}

#[derive(Deserialize)]
struct PullChunk {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    completed: Option<u64>,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::completion("request retries exhausted")))
    }

    /// Check whether the Ollama server is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Pull `model`, reporting download progress through `progress`.
    ///
    /// Pulling an already-present model completes immediately, which makes
    /// provider initialization idempotent.
    pub async fn pull_model(&self, model: &str, progress: Option<&InitProgress>) -> Result<()> {
        let url = format!("{}/api/pull", self.config.base_url);
        let request = PullRequest {
            name: model.to_string(),
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::initialization(format!("model pull request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::initialization(format!(
                "model pull failed: HTTP {}",
                response.status()
            )));
        }

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes =
                chunk.map_err(|e| Error::initialization(format!("model pull stream error: {e}")))?;
            let text = String::from_utf8_lossy(&bytes);

            // Parse NDJSON status lines; only sized download phases carry
            // total/completed counters.
            for line in text.lines() {
                if let Ok(status) = serde_json::from_str::<PullChunk>(line) {
                    if let (Some(callback), Some(total), Some(completed)) =
                        (progress, status.total, status.completed)
                    {
                        if total > 0 {
                            callback(completed as f32 / total as f32);
                        }
                    }
                }
            }
        }

        tracing::info!("Model '{}' is ready", model);
        Ok(())
    }

    /// Generate an embedding with retry
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let model = self.config.embed_model.clone();
        let client = self.client.clone();
        let text = text.to_string();

        self.retry_request(|| {
            let url = url.clone();
            let model = model.clone();
            let client = client.clone();
            let text = text.clone();

            async move {
                let request = EmbedRequest {
                    model,
                    prompt: text,
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("embedding request failed: {e}")))?;

                if !response.status().is_success() {
                    return Err(Error::embedding(format!(
                        "embedding failed: HTTP {}",
                        response.status()
                    )));
                }

                let body: EmbedResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("bad embedding response: {e}")))?;

                Ok(body.embedding)
            }
        })
        .await
    }

    /// Generate a chat reply with retry
    pub async fn chat(
        &self,
        messages: &[ConversationTurn],
        options: &GenerationOptions,
    ) -> Result<String> {
        let url = format!("{}/api/chat", self.config.base_url);
        let model = self.config.chat_model.clone();
        let client = self.client.clone();
        let messages = messages.to_vec();
        let options = ChatOptions {
            temperature: options.temperature,
            num_predict: options.max_tokens,
            top_p: options.top_p,
        };

        tracing::info!("Generating reply with model: {}", model);

        self.retry_request(|| {
            let url = url.clone();
            let model = model.clone();
            let client = client.clone();
            let messages = messages.clone();

            async move {
                let request = ChatRequest {
                    model,
                    messages,
                    stream: false,
                    options,
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::completion(format!("chat request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::completion(format!(
                        "chat failed: HTTP {} - {}",
                        status, body
                    )));
                }

                let body: ChatResponseBody = response
                    .json()
                    .await
                    .map_err(|e| Error::completion(format!("bad chat response: {e}")))?;

                Ok(body.message.content)
            }
        })
        .await
    }
}

/// Ollama embedding provider
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self::from_client(
            Arc::new(OllamaClient::new(config)?),
            config,
        ))
    }

    /// Create from an existing shared client
    pub fn from_client(client: Arc<OllamaClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.embed_model.clone(),
            dimensions: config.embed_dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn initialize(&self) -> Result<()> {
        self.client.pull_model(&self.model, None).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama chat completion provider
pub struct OllamaChat {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaChat {
    /// Create a new Ollama chat provider
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self::from_client(
            Arc::new(OllamaClient::new(config)?),
            config,
        ))
    }

    /// Create from an existing shared client
    pub fn from_client(client: Arc<OllamaClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.chat_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaChat {
    async fn initialize(&self, progress: Option<InitProgress>) -> Result<()> {
        self.client.pull_model(&self.model, progress.as_ref()).await
    }

    async fn complete(
        &self,
        messages: &[ConversationTurn],
        options: &GenerationOptions,
    ) -> Result<String> {
        self.client.chat(messages, options).await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Combined provider sharing a single client for embeddings and chat
pub struct OllamaProvider {
    embedder: OllamaEmbedder,
    chat: OllamaChat,
}

impl OllamaProvider {
    /// Create a combined Ollama provider
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Arc::new(OllamaClient::new(config)?);
        Ok(Self {
            embedder: OllamaEmbedder::from_client(Arc::clone(&client), config),
            chat: OllamaChat::from_client(client, config),
        })
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &OllamaEmbedder {
        &self.embedder
    }

    /// Get the chat provider
    pub fn chat(&self) -> &OllamaChat {
        &self.chat
    }

    /// Split into separate providers
    pub fn split(self) -> (OllamaEmbedder, OllamaChat) {
        (self.embedder, self.chat)
    }
}
