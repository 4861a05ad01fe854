use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::Retriever;
use crate::errors::{RouterError, RouterResult};
use crate::graph_db::GraphStore;
use crate::models::{RetrievalResult, ToolName};

/// Schema visualization, projected to plain maps so every driver can decode it.
const SCHEMA_QUERY: &str = "
CALL db.schema.visualization() YIELD nodes, relationships
RETURN [n IN nodes | {id: id(n), labels: labels(n), name: n.name}] AS nodes,
       [r IN relationships | {id: id(r), type: type(r), start: id(startNode(r)), end: id(endNode(r))}] AS relationships
";

/// Returns the graph's node labels and relationship types.
///
/// Failures are returned as `Err`: the router does not fall back from here.
pub struct SchemaRetriever {
    store: Arc<dyn GraphStore>,
}

impl SchemaRetriever {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Raw `{nodes, relationships}` lists.
    pub async fn visualize(&self) -> RouterResult<(Vec<Value>, Vec<Value>)> {
        let rows = self.store.run_query(SCHEMA_QUERY, Map::new()).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::Neo4j("Schema visualization returned no rows".to_string()))?;

        Ok((list_column(&row, "nodes")?, list_column(&row, "relationships")?))
    }

    /// Short text description of the schema, used to prompt Text2Cypher.
    pub async fn describe(&self) -> RouterResult<String> {
        let (nodes, relationships) = self.visualize().await?;
        Ok(describe_schema(&nodes, &relationships))
    }
}

#[async_trait]
impl Retriever for SchemaRetriever {
    fn tool(&self) -> ToolName {
        ToolName::SchemaTool
    }

    async fn retrieve(&self, _question: &str, _top_k: usize) -> RouterResult<RetrievalResult> {
        let (nodes, relationships) = self.visualize().await?;
        Ok(RetrievalResult::Schema { nodes, relationships })
    }
}

fn list_column(row: &Map<String, Value>, column: &str) -> RouterResult<Vec<Value>> {
    match row.get(column) {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => Err(RouterError::Neo4j(format!(
            "Expected a list for {}, got {}",
            column, other
        ))),
    }
}

/// Render nodes and relationships as
/// `Node labels: ...` / `Relationships: (:A)-[:REL]->(:B)` lines.
pub(crate) fn describe_schema(nodes: &[Value], relationships: &[Value]) -> String {
    let label_of = |node: &Value| -> String {
        node.get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                node.get("labels")
                    .and_then(Value::as_array)
                    .and_then(|labels| labels.first())
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default()
    };

    let labels: Vec<String> = nodes.iter().map(label_of).filter(|l| !l.is_empty()).collect();

    let label_for_id = |id: Option<&Value>| -> String {
        id.and_then(|id| nodes.iter().find(|n| n.get("id") == Some(id)))
            .map(label_of)
            .unwrap_or_default()
    };

    let patterns: Vec<String> = relationships
        .iter()
        .filter_map(|rel| {
            let rel_type = rel.get("type").and_then(Value::as_str)?;
            Some(format!(
                "(:{})-[:{}]->(:{})",
                label_for_id(rel.get("start")),
                rel_type,
                label_for_id(rel.get("end"))
            ))
        })
        .collect();

    format!(
        "Node labels: {}\nRelationships: {}",
        labels.join(", "),
        patterns.join(", ")
    )
}
