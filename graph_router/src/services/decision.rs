use graphrag_observability::log_fallback;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::embeddings::Embedder;
use crate::errors::RouterResult;
use crate::graph_db::GraphStore;
use crate::llm::LanguageModel;
use crate::models::{RetrievalResult, RouteDecision, ToolName};
use crate::retrievers::{
    Retriever, SchemaRetriever, Text2CypherRetriever, VectorCypherRetriever, VectorRetriever,
    DEFAULT_RETRIEVAL_QUERY,
};
use crate::services::entity_probe::entity_exists;
use crate::services::query_analysis::{classify, extract_entities_simple, wants_schema};

pub const DEFAULT_INDEX_NAME: &str = "chunkEmbeddings";
pub const DEFAULT_TOP_K: usize = 5;

const TEXT2CYPHER_NOT_CONFIGURED: &str = "Text2Cypher not configured (no LLM).";

/// Fixed settings a router is built with
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub index_name: String,
    pub top_k: usize,
    /// Schema text for the Text2Cypher prompt; read from the store when `None`
    pub neo4j_schema: Option<String>,
    /// Graph expansion run by the vector+graph tool; receives `$ids`
    pub retrieval_query: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            top_k: DEFAULT_TOP_K,
            neo4j_schema: None,
            retrieval_query: DEFAULT_RETRIEVAL_QUERY.to_string(),
        }
    }
}

impl RouterConfig {
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.neo4j_schema = Some(schema.into());
        self
    }

    pub fn with_retrieval_query(mut self, query: impl Into<String>) -> Self {
        self.retrieval_query = query.into();
        self
    }
}

/// Routes a question to one retrieval tool and falls back when it comes up short.
///
/// Holds no per-question state; concurrent `route` calls are as safe as the
/// injected store, embedder and model.
pub struct GraphRagRouter {
    store: Arc<dyn GraphStore>,
    config: RouterConfig,
    schema: SchemaRetriever,
    vector: VectorRetriever,
    vector_cypher: VectorCypherRetriever,
    text2cypher: Option<Text2CypherRetriever>,
}

impl GraphRagRouter {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn Embedder>,
        llm: Option<Arc<dyn LanguageModel>>,
        config: RouterConfig,
    ) -> Self {
        let vector = VectorRetriever::new(store.clone(), embedder.clone(), config.index_name.clone());
        let vector_cypher = VectorCypherRetriever::new(
            VectorRetriever::new(store.clone(), embedder, config.index_name.clone()),
            config.retrieval_query.clone(),
        );
        let text2cypher = llm.map(|llm| {
            Text2CypherRetriever::new(store.clone(), llm, config.neo4j_schema.clone())
        });

        info!(
            index = %vector.index_name(),
            top_k = config.top_k,
            text2cypher = text2cypher.is_some(),
            "Graph RAG router ready"
        );

        Self {
            schema: SchemaRetriever::new(store.clone()),
            store,
            config,
            vector,
            vector_cypher,
            text2cypher,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn has_text2cypher(&self) -> bool {
        self.text2cypher.is_some()
    }

    /// Pick a tool for `question`, run it, and fall back if needed.
    ///
    /// Returns `Err` only when the store fails during entity probing or the
    /// schema tool; retrieval failures come back inside the result.
    #[instrument(skip(self))]
    pub async fn route(&self, question: &str) -> RouterResult<RouteDecision> {
        if wants_schema(question) {
            info!("Schema question");
            return Ok(RouteDecision::new(
                ToolName::SchemaTool,
                self.run_schema_tool().await?,
            ));
        }

        let entities = extract_entities_simple(question);
        let in_graph = self.any_in_graph(&entities).await?;
        let signals = classify(question, in_graph);

        info!(
            precise = signals.is_precise,
            in_graph = signals.in_graph,
            candidates = entities.len(),
            "Classified question"
        );

        if signals.is_precise && self.has_text2cypher() {
            let result = self.run_text2cypher(question).await?;
            if result.is_ok() {
                return Ok(RouteDecision::new(ToolName::Text2cypherTool, result));
            }
            log_fallback!(ToolName::Text2cypherTool, ToolName::VectorCypherTool, "error");
            return self.vector_cypher_with_fallback(question).await;
        }

        if signals.in_graph {
            return self.vector_cypher_with_fallback(question).await;
        }

        Ok(RouteDecision::new(
            ToolName::VectorTool,
            self.run_vector(question).await?,
        ))
    }

    pub async fn run_vector(&self, question: &str) -> RouterResult<RetrievalResult> {
        self.vector.retrieve(question, self.config.top_k).await
    }

    pub async fn run_vector_cypher(&self, question: &str) -> RouterResult<RetrievalResult> {
        self.vector_cypher.retrieve(question, self.config.top_k).await
    }

    pub async fn run_text2cypher(&self, question: &str) -> RouterResult<RetrievalResult> {
        match &self.text2cypher {
            Some(retriever) => retriever.retrieve(question, self.config.top_k).await,
            None => Ok(RetrievalResult::error(TEXT2CYPHER_NOT_CONFIGURED)),
        }
    }

    pub async fn run_schema_tool(&self) -> RouterResult<RetrievalResult> {
        self.schema.retrieve("", self.config.top_k).await
    }

    /// Vector+graph first; plain vector if that yields no hits.
    async fn vector_cypher_with_fallback(&self, question: &str) -> RouterResult<RouteDecision> {
        let result = self.run_vector_cypher(question).await?;
        if !result.is_empty() {
            return Ok(RouteDecision::new(ToolName::VectorCypherTool, result));
        }

        log_fallback!(ToolName::VectorCypherTool, ToolName::VectorTool, "no hits");
        Ok(RouteDecision::new(
            ToolName::VectorTool,
            self.run_vector(question).await?,
        ))
    }

    /// Probes candidates in order and stops at the first one found.
    async fn any_in_graph(&self, entities: &[String]) -> RouterResult<bool> {
        for name in entities {
            if entity_exists(self.store.as_ref(), name).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
