use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client as OpenAIClient,
};
use async_trait::async_trait;
use graphrag_observability::log_external_call;

use super::LanguageModel;
use crate::errors::{RouterError, RouterResult};

pub struct OpenAiLlm {
    client: OpenAIClient<OpenAIConfig>,
    model: String,
}

impl OpenAiLlm {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn llm_error(e: OpenAIError) -> RouterError {
    RouterError::Llm(e.to_string())
}

#[async_trait]
impl LanguageModel for OpenAiLlm {
    async fn invoke(&self, prompt: &str) -> RouterResult<String> {
        log_external_call!("openai", "chat_completion");

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .temperature(0.0)
            .messages(vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(llm_error)?
                .into()])
            .build()
            .map_err(llm_error)?;

        let response = self.client.chat().create(request).await.map_err(llm_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RouterError::Llm("Empty completion returned from OpenAI".to_string()))
    }
}
