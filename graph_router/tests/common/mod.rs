//! In-memory collaborators for driving the router without Neo4j or OpenAI.

#![allow(dead_code)]

use async_trait::async_trait;
use graph_router::embeddings::Embedder;
use graph_router::graph_db::{GraphStore, QueryParams, Row};
use graph_router::llm::LanguageModel;
use graph_router::{GraphRagRouter, RouterConfig, RouterError, RouterResult};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn to_row(value: Value) -> Row {
    value.as_object().cloned().expect("row must be an object")
}

/// Graph store that answers the router's queries from fixed data and records each call.
#[derive(Default)]
pub struct StubStore {
    /// Lowercased names present in the graph
    pub entities: HashSet<String>,
    /// Number of nodes the vector index returns
    pub vector_matches: usize,
    /// Expansion query returns nothing when set
    pub expansion_empty: bool,
    /// Expansion query fails when set
    pub fail_expand: bool,
    /// Rows returned by generated Cypher
    pub cypher_rows: Vec<Value>,
    pub fail_probe: bool,
    pub fail_schema: bool,
    pub fail_cypher: bool,
    pub calls: Mutex<Vec<String>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self {
            vector_matches: 3,
            ..Default::default()
        }
    }

    pub fn with_entities(mut self, names: &[&str]) -> Self {
        self.entities = names.iter().map(|n| n.to_lowercase()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn probes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("probe:").map(str::to_string))
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl GraphStore for StubStore {
    async fn run_query(&self, cypher: &str, params: QueryParams) -> RouterResult<Vec<Row>> {
        if cypher.contains("toLower($name)") {
            let name = params["name"].as_str().unwrap_or_default().to_string();
            self.record(format!("probe:{}", name));
            if self.fail_probe {
                return Err(RouterError::Neo4j("Connection refused".to_string()));
            }
            let exists = self.entities.contains(&name.to_lowercase());
            return Ok(vec![to_row(json!({ "exists": exists }))]);
        }

        if cypher.contains("db.schema.visualization") {
            self.record("schema");
            if self.fail_schema {
                return Err(RouterError::Neo4j("Connection refused".to_string()));
            }
            return Ok(vec![to_row(json!({
                "nodes": [
                    {"id": -1, "labels": ["Employee"], "name": "Employee"},
                    {"id": -2, "labels": ["City"], "name": "City"}
                ],
                "relationships": [
                    {"id": -3, "type": "WORKS_IN", "start": -1, "end": -2}
                ]
            }))]);
        }

        if cypher.contains("db.index.vector.queryNodes") {
            self.record("vector");
            let top_k = params["top_k"].as_u64().unwrap_or(0) as usize;
            return Ok((0..self.vector_matches.min(top_k))
                .map(|i| {
                    to_row(json!({
                        "node": {"text": format!("chunk {}", i), "embedding": [0.0, 1.0]},
                        "labels": ["Chunk"],
                        "id": i as i64,
                        "score": 0.9 - (i as f64) * 0.1,
                    }))
                })
                .collect());
        }

        if cypher.contains("$ids") {
            self.record("expand");
            if self.fail_expand {
                return Err(RouterError::Neo4j("Unknown function 'id'".to_string()));
            }
            if self.expansion_empty {
                return Ok(vec![]);
            }
            let ids = params["ids"].as_array().cloned().unwrap_or_default();
            return Ok(ids
                .iter()
                .map(|id| {
                    to_row(json!({
                        "id": id,
                        "text": format!("chunk {}", id),
                        "entities": [{"labels": ["City"], "name": "Paris", "id": 100}]
                    }))
                })
                .collect());
        }

        self.record("cypher");
        if self.fail_cypher {
            return Err(RouterError::Neo4j("SyntaxError: Invalid input".to_string()));
        }
        Ok(self.cypher_rows.iter().cloned().map(to_row).collect())
    }
}

pub struct StubEmbedder;

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed_query(&self, text: &str) -> RouterResult<Vec<f32>> {
        Ok(vec![text.len() as f32, 1.0])
    }
}

/// Language model with a canned reply
pub struct StubLlm {
    reply: Option<String>,
}

impl StubLlm {
    pub fn replying(cypher: &str) -> Self {
        Self {
            reply: Some(cypher.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl LanguageModel for StubLlm {
    async fn invoke(&self, _prompt: &str) -> RouterResult<String> {
        self.reply
            .clone()
            .ok_or_else(|| RouterError::Llm("Service unavailable".to_string()))
    }
}

pub fn router(store: Arc<StubStore>, llm: Option<StubLlm>) -> GraphRagRouter {
    GraphRagRouter::new(
        store,
        Arc::new(StubEmbedder),
        llm.map(|l| Arc::new(l) as Arc<dyn LanguageModel>),
        RouterConfig::default().with_schema("Node labels: Employee, City"),
    )
}
