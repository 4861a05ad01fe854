use serde::Serialize;
use serde_json::Value;

use super::ToolName;

/// A single retrieved item. The router never looks inside it.
pub type Hit = Value;

/// Outcome of one retrieval tool invocation.
///
/// Serializes to the mapping shapes callers see on the wire:
/// `{"hits": [...]}`, `{"nodes": [...], "relationships": [...]}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RetrievalResult {
    Hits {
        hits: Vec<Hit>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    Schema {
        nodes: Vec<Value>,
        relationships: Vec<Value>,
    },
    Error {
        error: String,
    },
}

impl RetrievalResult {
    pub fn hits(hits: Vec<Hit>) -> Self {
        RetrievalResult::Hits { hits, metadata: None }
    }

    pub fn hits_with_metadata(hits: Vec<Hit>, metadata: Value) -> Self {
        RetrievalResult::Hits {
            hits,
            metadata: Some(metadata),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RetrievalResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RetrievalResult::Error { .. })
    }

    /// True unless the result carries an error. An empty hit list is still ok.
    pub fn is_ok(&self) -> bool {
        !self.is_error()
    }

    /// True when there is no `hits` field or it is empty.
    pub fn is_empty(&self) -> bool {
        self.hit_list().map_or(true, |hits| hits.is_empty())
    }

    pub fn hit_list(&self) -> Option<&[Hit]> {
        match self {
            RetrievalResult::Hits { hits, .. } => Some(hits),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RetrievalResult::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Tool chosen by the router and what it returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDecision {
    pub tool: ToolName,
    pub result: RetrievalResult,
}

impl RouteDecision {
    pub fn new(tool: ToolName, result: RetrievalResult) -> Self {
        Self { tool, result }
    }
}
