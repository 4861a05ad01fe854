//! Graph RAG router
//!
//! Picks one of four retrieval tools for a natural-language question over a
//! Neo4j knowledge graph with vector embeddings:
//! - `schema_tool`: schema visualization for questions about the data model
//! - `text2cypher_tool`: LLM-generated Cypher for counts, lists and comparisons
//! - `vector_cypher_tool`: vector search expanded through the graph
//! - `vector_tool`: plain vector similarity search
//!
//! The store, embedder and language model are injected as traits, so the
//! routing rules run the same against Neo4j/OpenAI or in-memory stubs.

pub mod bootstrap;
pub mod embeddings;
pub mod errors;
pub mod graph_db;
pub mod llm;
pub mod models;
pub mod retrievers;
pub mod services;

pub use errors::{RouterError, RouterResult};
pub use models::{Hit, RetrievalResult, RouteDecision, ToolName};
pub use services::{GraphRagRouter, RouterConfig};
