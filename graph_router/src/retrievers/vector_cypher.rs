use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::{recover, Retriever, VectorRetriever};
use crate::errors::{RouterError, RouterResult};
use crate::graph_db::{params, Row};
use crate::models::{RetrievalResult, ToolName};

/// Expansion run over the vector matches: chunk text plus the entities it mentions.
/// Receives the matched nodes' internal ids as `$ids`. Rows carrying an `id`
/// column are put back in similarity order and given the match's `score`.
pub const DEFAULT_RETRIEVAL_QUERY: &str = "
MATCH (c:Chunk)
WHERE id(c) IN $ids
OPTIONAL MATCH (c)-[:MENTIONS]->(e)
WITH c, collect(DISTINCT e) AS ents
RETURN id(c) AS id, c.text AS text,
       [x IN ents | {labels: labels(x), name: coalesce(x.name, x.id, ''), id: id(x)}] AS entities
";

/// Vector search followed by a graph traversal around each match
pub struct VectorCypherRetriever {
    vector: VectorRetriever,
    retrieval_query: String,
}

impl VectorCypherRetriever {
    pub fn new(vector: VectorRetriever, retrieval_query: impl Into<String>) -> Self {
        Self {
            vector,
            retrieval_query: retrieval_query.into(),
        }
    }

    async fn search_and_expand(&self, question: &str, top_k: usize) -> RouterResult<RetrievalResult> {
        let matches = self.vector.search(question, top_k).await?;
        if matches.is_empty() {
            return Ok(RetrievalResult::hits(vec![]));
        }

        let ids = matches
            .iter()
            .map(|row| {
                row.get("id")
                    .and_then(Value::as_i64)
                    .map(Value::from)
                    .ok_or_else(|| RouterError::Internal("Vector match without an id".to_string()))
            })
            .collect::<RouterResult<Vec<_>>>()?;

        let rows = self
            .vector
            .store
            .run_query(&self.retrieval_query, params([("ids", Value::Array(ids))]))
            .await?;

        tracing::debug!(matches = matches.len(), expanded = rows.len(), "Graph expansion");
        Ok(RetrievalResult::hits(rank_by_matches(&matches, rows)))
    }
}

fn row_id(row: &Row) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

/// Order expansion rows like the vector matches they came from.
///
/// Queries that return no `id` column cannot be joined and keep the store's order.
/// Matches without an expansion row are dropped.
fn rank_by_matches(matches: &[Row], rows: Vec<Row>) -> Vec<Value> {
    if rows.iter().any(|row| row_id(row).is_none()) {
        return rows.into_iter().map(Value::Object).collect();
    }

    let mut by_id: HashMap<i64, Row> = rows
        .into_iter()
        .filter_map(|row| row_id(&row).map(|id| (id, row)))
        .collect();

    matches
        .iter()
        .filter_map(|m| {
            let mut row = by_id.remove(&row_id(m)?)?;
            if let Some(score) = m.get("score") {
                row.entry("score").or_insert_with(|| score.clone());
            }
            Some(Value::Object(row))
        })
        .collect()
}

#[async_trait]
impl Retriever for VectorCypherRetriever {
    fn tool(&self) -> ToolName {
        ToolName::VectorCypherTool
    }

    async fn retrieve(&self, question: &str, top_k: usize) -> RouterResult<RetrievalResult> {
        let outcome = self.search_and_expand(question, top_k).await;
        Ok(recover(self.tool(), outcome))
    }
}
