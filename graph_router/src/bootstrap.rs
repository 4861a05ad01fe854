//! Builds a router from environment settings.
//!
//! The only place concrete backends are chosen; `GraphRagRouter` itself never
//! reads the environment.

use graphrag_config::RouterSettings;
use std::sync::Arc;

use crate::embeddings::{Embedder, OpenAiEmbedder};
use crate::errors::RouterResult;
use crate::graph_db::{GraphStore, Neo4jClient};
use crate::llm::{LanguageModel, OpenAiLlm};
use crate::services::{GraphRagRouter, RouterConfig};

/// Router settings derived from the environment.
pub fn router_config(settings: &RouterSettings) -> RouterConfig {
    RouterConfig::default()
        .with_index_name(settings.vector_index_name.clone())
        .with_top_k(settings.top_k)
}

/// The language model, if an API key is configured.
pub fn language_model(settings: &RouterSettings) -> Option<Arc<dyn LanguageModel>> {
    settings.openai.api_key.as_deref().map(|key| {
        Arc::new(OpenAiLlm::new(key, settings.openai.model.clone())) as Arc<dyn LanguageModel>
    })
}

/// Connect to Neo4j and wire up the OpenAI embedder and optional LLM.
pub async fn build_router(settings: &RouterSettings) -> RouterResult<GraphRagRouter> {
    let store: Arc<dyn GraphStore> = Arc::new(Neo4jClient::from_settings(&settings.neo4j).await?);
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        settings.openai.api_key.as_deref(),
        settings.openai.embedding_model.clone(),
    ));
    let llm = language_model(settings);
    if !settings.openai.llm_enabled() {
        tracing::warn!("OPENAI_API_KEY not set, Text2Cypher disabled");
    }

    Ok(GraphRagRouter::new(store, embedder, llm, router_config(settings)))
}
