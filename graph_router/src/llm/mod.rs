pub mod openai;

pub use openai::OpenAiLlm;

use async_trait::async_trait;

use crate::errors::RouterResult;

/// Language model used to translate questions into Cypher.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn invoke(&self, prompt: &str) -> RouterResult<String>;
}
