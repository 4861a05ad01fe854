//! Environment-sourced settings for the graph router collaborators.
//!
//! Nothing here is consumed by the routing core directly; the bootstrap code
//! turns these values into a Neo4j connection, an embedder and an optional LLM.

use std::env;
use thiserror::Error;

pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_NEO4J_USERNAME: &str = "neo4j";
pub const DEFAULT_NEO4J_PASSWORD: &str = "password";
pub const DEFAULT_NEO4J_DATABASE: &str = "neo4j";
pub const DEFAULT_VECTOR_INDEX_NAME: &str = "chunkEmbeddings";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct Neo4jSettings {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone, Debug)]
pub struct OpenAiSettings {
    /// `None` leaves the router without a language model (no Text2Cypher).
    pub api_key: Option<String>,
    pub model: String,
    pub embedding_model: String,
}

impl OpenAiSettings {
    pub fn llm_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct RouterSettings {
    pub neo4j: Neo4jSettings,
    pub openai: OpenAiSettings,
    pub vector_index_name: String,
    pub top_k: usize,
}

impl RouterSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let top_k = match env::var("ROUTER_TOP_K") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "ROUTER_TOP_K".to_string(),
                    value: raw.clone(),
                })?,
            Err(_) => DEFAULT_TOP_K,
        };

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(Self {
            neo4j: Neo4jSettings {
                uri: var_or("NEO4J_URI", DEFAULT_NEO4J_URI),
                username: var_or("NEO4J_USERNAME", DEFAULT_NEO4J_USERNAME),
                password: var_or("NEO4J_PASSWORD", DEFAULT_NEO4J_PASSWORD),
                database: var_or("NEO4J_DATABASE", DEFAULT_NEO4J_DATABASE),
            },
            openai: OpenAiSettings {
                api_key,
                model: var_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                embedding_model: var_or("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            },
            vector_index_name: var_or("VECTOR_INDEX_NAME", DEFAULT_VECTOR_INDEX_NAME),
            top_k,
        })
    }
}

/// Load a `.env` file if one is present. Missing files are not an error.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(_) => tracing::debug!("No .env file found, using process environment"),
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
