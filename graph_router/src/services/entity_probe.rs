use serde_json::Value;

use crate::errors::RouterResult;
use crate::graph_db::{params, GraphStore};

const ENTITY_EXISTS_QUERY: &str = "
MATCH (n)
WHERE n.name IS NOT NULL AND toLower(toString(n.name)) = toLower($name)
RETURN count(n) > 0 AS exists
";

/// Whether any node's `name` equals `name`, ignoring case.
///
/// Store failures are returned as errors, never read as "not found".
pub async fn entity_exists(store: &dyn GraphStore, name: &str) -> RouterResult<bool> {
    let rows = store
        .run_query(
            ENTITY_EXISTS_QUERY,
            params([("name", Value::String(name.to_string()))]),
        )
        .await?;

    let exists = rows
        .first()
        .and_then(|row| row.get("exists"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    tracing::debug!(entity = %name, exists, "Entity probe");
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RouterError;
    use crate::graph_db::{QueryParams, Row};
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedStore(RouterResult<Vec<Row>>);

    #[async_trait]
    impl GraphStore for FixedStore {
        async fn run_query(&self, cypher: &str, params: QueryParams) -> RouterResult<Vec<Row>> {
            assert!(cypher.contains("toLower($name)"));
            assert!(params.contains_key("name"));
            match &self.0 {
                Ok(rows) => Ok(rows.clone()),
                Err(e) => Err(RouterError::Neo4j(e.to_string())),
            }
        }
    }

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_exists_true() {
        let store = FixedStore(Ok(vec![row(json!({"exists": true}))]));
        assert!(entity_exists(&store, "Paris").await.unwrap());
    }

    #[tokio::test]
    async fn test_no_rows_is_false() {
        let store = FixedStore(Ok(vec![]));
        assert!(!entity_exists(&store, "Atlantis").await.unwrap());
    }

    #[tokio::test]
    async fn test_connectivity_error_propagates() {
        let store = FixedStore(Err(RouterError::Neo4j("connection refused".to_string())));
        let err = entity_exists(&store, "Paris").await.unwrap_err();
        assert!(matches!(err, RouterError::Neo4j(_)));
    }
}
