use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::{recover, Retriever};
use crate::embeddings::Embedder;
use crate::errors::RouterResult;
use crate::graph_db::{params, GraphStore, Row};
use crate::models::{RetrievalResult, ToolName};

const VECTOR_SEARCH_QUERY: &str = "
CALL db.index.vector.queryNodes($index_name, $top_k, $query_vector)
YIELD node, score
RETURN node { .* } AS node, labels(node) AS labels, elementId(node) AS elementId, id(node) AS id, score
";

/// Property holding the stored embedding; stripped from returned nodes.
const EMBEDDING_PROPERTY: &str = "embedding";

/// Similarity search over a named vector index
pub struct VectorRetriever {
    pub(crate) store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
    index_name: String,
}

impl VectorRetriever {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn Embedder>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            index_name: index_name.into(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Embed the question and return up to `top_k` matching rows, best first.
    pub(crate) async fn search(&self, question: &str, top_k: usize) -> RouterResult<Vec<Row>> {
        let embedding = self.embedder.embed_query(question).await?;
        let query_vector: Vec<Value> = embedding
            .into_iter()
            .map(|x| Value::from(f64::from(x)))
            .collect();

        let mut rows = self
            .store
            .run_query(
                VECTOR_SEARCH_QUERY,
                params([
                    ("index_name", Value::String(self.index_name.clone())),
                    ("top_k", Value::from(top_k as u64)),
                    ("query_vector", Value::Array(query_vector)),
                ]),
            )
            .await?;

        for row in rows.iter_mut() {
            if let Some(Value::Object(node)) = row.get_mut("node") {
                node.remove(EMBEDDING_PROPERTY);
            }
        }
        rows.truncate(top_k);

        tracing::debug!(index = %self.index_name, matches = rows.len(), "Vector search");
        Ok(rows)
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    fn tool(&self) -> ToolName {
        ToolName::VectorTool
    }

    async fn retrieve(&self, question: &str, top_k: usize) -> RouterResult<RetrievalResult> {
        let outcome = self
            .search(question, top_k)
            .await
            .map(|rows| RetrievalResult::hits(rows.into_iter().map(Value::Object).collect()));
        Ok(recover(self.tool(), outcome))
    }
}
