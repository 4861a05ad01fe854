use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Neo4j error: {0}")]
    Neo4j(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<graphrag_config::ConfigError> for RouterError {
    fn from(e: graphrag_config::ConfigError) -> Self {
        RouterError::Config(e.to_string())
    }
}

impl From<neo4rs::Error> for RouterError {
    fn from(e: neo4rs::Error) -> Self {
        RouterError::Neo4j(e.to_string())
    }
}

pub type RouterResult<T> = Result<T, RouterError>;
