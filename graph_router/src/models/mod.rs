//! Models for the graph router

pub mod retrieval;

pub use retrieval::{Hit, RetrievalResult, RouteDecision};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Retrieval tool a question was answered with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Schema visualization of the graph
    SchemaTool,
    /// Natural language translated to Cypher and executed
    Text2cypherTool,
    /// Vector search followed by graph expansion around the matches
    VectorCypherTool,
    /// Plain vector similarity search
    VectorTool,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SchemaTool => "schema_tool",
            ToolName::Text2cypherTool => "text2cypher_tool",
            ToolName::VectorCypherTool => "vector_cypher_tool",
            ToolName::VectorTool => "vector_tool",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
