use async_trait::async_trait;
use graphrag_config::Neo4jSettings;
use graphrag_observability::log_external_call;
use neo4rs::{query, BoltList, BoltMap, BoltNull, BoltString, BoltType, ConfigBuilder, Graph};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::{GraphStore, QueryParams, Row};
use crate::errors::{RouterError, RouterResult};

/// Neo4j client compatible with both local Neo4j and Neo4j AuraDB
pub struct Neo4jClient {
    graph: Arc<Graph>,
    uri: String,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    ///
    /// # Arguments
    /// * `uri` - Neo4j connection URI. Supports:
    ///   - Local: `bolt://localhost:7687`
    ///   - AuraDB: `neo4j+s://xxxxx.databases.neo4j.io` or `neo4j+ssc://...`
    /// * `user` - Database username
    /// * `password` - Database password
    /// * `database` - Database name, usually `neo4j`
    pub async fn new(uri: &str, user: &str, password: &str, database: &str) -> RouterResult<Self> {
        tracing::info!("Connecting to Neo4j at: {}", uri);

        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(|e| RouterError::Neo4j(format!("Failed to build Neo4j config: {}", e)))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| RouterError::Neo4j(format!("Failed to connect to Neo4j: {}", e)))?;

        // Test the connection
        let mut result = graph
            .execute(query("RETURN 1 as test"))
            .await
            .map_err(|e| RouterError::Neo4j(format!("Connection test failed: {}", e)))?;

        if result.next().await?.is_some() {
            tracing::info!(aura = Self::uri_is_aura(uri), "Neo4j connection established");
        }

        Ok(Self {
            graph: Arc::new(graph),
            uri: uri.to_string(),
        })
    }

    pub async fn from_settings(settings: &Neo4jSettings) -> RouterResult<Self> {
        Self::new(
            &settings.uri,
            &settings.username,
            &settings.password,
            &settings.database,
        )
        .await
    }

    /// Get the connection URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Check if connected to AuraDB
    pub fn is_aura(&self) -> bool {
        Self::uri_is_aura(&self.uri)
    }

    fn uri_is_aura(uri: &str) -> bool {
        uri.contains("neo4j.io") || uri.starts_with("neo4j+s://") || uri.starts_with("neo4j+ssc://")
    }
}

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn run_query(&self, cypher: &str, params: QueryParams) -> RouterResult<Vec<Row>> {
        log_external_call!("neo4j", "run_query");
        let started = Instant::now();

        let mut q = query(cypher);
        for (key, value) in params {
            q = q.param(&key, json_to_bolt(value));
        }

        let mut stream = self.graph.execute(q).await?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let value: Value = row
                .to()
                .map_err(|e| RouterError::Neo4j(format!("Failed to decode row: {}", e)))?;
            match value {
                Value::Object(map) => rows.push(map),
                other => {
                    return Err(RouterError::Neo4j(format!(
                        "Unexpected row shape: {}",
                        other
                    )))
                }
            }
        }

        log_external_call!(
            "neo4j",
            "run_query",
            started.elapsed().as_millis() as u64,
            "ok"
        );
        Ok(rows)
    }
}

/// Convert a JSON parameter into the Bolt value neo4rs sends over the wire.
fn json_to_bolt(value: Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => b.into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        Value::String(s) => s.into(),
        Value::Array(items) => BoltType::List(BoltList::from(
            items.into_iter().map(json_to_bolt).collect::<Vec<_>>(),
        )),
        Value::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, value) in map {
                bolt.put(BoltString::from(key.as_str()), json_to_bolt(value));
            }
            BoltType::Map(bolt)
        }
    }
}
