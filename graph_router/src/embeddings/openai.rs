use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequest, EmbeddingInput},
    Client as OpenAIClient,
};
use async_trait::async_trait;
use graphrag_observability::log_external_call;

use super::Embedder;
use crate::errors::{RouterError, RouterResult};

pub struct OpenAiEmbedder {
    client: OpenAIClient<OpenAIConfig>,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: Option<&str>, model: impl Into<String>) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        Self {
            // Falls back to OPENAI_API_KEY from the environment when no key is passed
            client: OpenAIClient::with_config(config),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_query(&self, text: &str) -> RouterResult<Vec<f32>> {
        log_external_call!("openai", "embeddings");

        let response = self
            .client
            .embeddings()
            .create(CreateEmbeddingRequest {
                model: self.model.clone(),
                input: EmbeddingInput::String(text.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| RouterError::Embedding(format!("Failed to create embedding: {}", e)))?;

        response
            .data
            .into_iter()
            .next()
            .map(|e| e.embedding)
            .ok_or_else(|| RouterError::Embedding("No embedding returned from OpenAI".to_string()))
    }
}
