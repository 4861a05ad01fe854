//! Retrieval strategies the router chooses between.
//!
//! Every strategy answers `retrieve(question, top_k)`. Vector, vector+graph and
//! Text2Cypher fold their own failures into `RetrievalResult::Error`; only the
//! schema tool returns `Err`, since a failing schema call means the store is down.

pub mod schema;
pub mod text2cypher;
pub mod vector;
pub mod vector_cypher;

pub use schema::SchemaRetriever;
pub use text2cypher::Text2CypherRetriever;
pub use vector::VectorRetriever;
pub use vector_cypher::{VectorCypherRetriever, DEFAULT_RETRIEVAL_QUERY};

use async_trait::async_trait;

use crate::errors::RouterResult;
use crate::models::{RetrievalResult, ToolName};

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Name reported when this retriever produced the final result
    fn tool(&self) -> ToolName;

    async fn retrieve(&self, question: &str, top_k: usize) -> RouterResult<RetrievalResult>;
}

/// Turn a strategy-level failure into an `error` result.
pub(crate) fn recover(tool: ToolName, outcome: RouterResult<RetrievalResult>) -> RetrievalResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(tool = %tool, error = %e, "Retrieval failed");
            RetrievalResult::error(e.to_string())
        }
    }
}
