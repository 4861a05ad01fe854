pub mod neo4j_client;

pub use neo4j_client::Neo4jClient;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::RouterResult;

/// One result row, keyed by returned column name.
pub type Row = Map<String, Value>;

/// Named query parameters.
pub type QueryParams = Map<String, Value>;

/// Graph store the router and its retrievers run Cypher against.
///
/// Connectivity and execution failures come back as `Err`; callers decide
/// whether to recover them into a result or propagate.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn run_query(&self, cypher: &str, params: QueryParams) -> RouterResult<Vec<Row>>;
}

/// Build a parameter map from `(name, value)` pairs.
pub fn params<I, K>(pairs: I) -> QueryParams
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
