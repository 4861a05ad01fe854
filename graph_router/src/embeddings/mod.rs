pub mod openai;

pub use openai::OpenAiEmbedder;

use async_trait::async_trait;

use crate::errors::RouterResult;

/// Turns a question into the vector used to query the vector index.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_query(&self, text: &str) -> RouterResult<Vec<f32>>;
}
