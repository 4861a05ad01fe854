use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{recover, Retriever, SchemaRetriever};
use crate::errors::{RouterError, RouterResult};
use crate::graph_db::GraphStore;
use crate::llm::LanguageModel;
use crate::models::{RetrievalResult, ToolName};

const PROMPT_TEMPLATE: &str = "You translate questions into Cypher for a Neo4j graph database.

Graph schema:
{schema}

Question:
{question}

Use only the node labels, relationship types and properties listed in the schema.
Answer with the Cypher statement alone: no explanation and no code fences.

Cypher:";

/// Translates the question to Cypher with a language model and runs it
pub struct Text2CypherRetriever {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LanguageModel>,
    schema: OnceCell<String>,
}

impl Text2CypherRetriever {
    /// `schema` is the text shown to the model; when `None` it is read from
    /// the store on first use.
    pub fn new(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LanguageModel>,
        schema: Option<String>,
    ) -> Self {
        let cell = match schema {
            Some(text) => OnceCell::new_with(Some(text)),
            None => OnceCell::new(),
        };
        Self {
            store,
            llm,
            schema: cell,
        }
    }

    async fn schema_text(&self) -> RouterResult<&str> {
        let text = self
            .schema
            .get_or_try_init(|| async {
                tracing::debug!("Reading graph schema for Text2Cypher prompt");
                SchemaRetriever::new(self.store.clone()).describe().await
            })
            .await?;
        Ok(text.as_str())
    }

    async fn translate(&self, question: &str) -> RouterResult<String> {
        let schema = self.schema_text().await?;
        let prompt = PROMPT_TEMPLATE
            .replace("{schema}", schema)
            .replace("{question}", question);

        let reply = self.llm.invoke(&prompt).await?;
        let cypher = extract_cypher(&reply);
        if cypher.is_empty() {
            return Err(RouterError::Llm("Model returned no Cypher".to_string()));
        }
        Ok(cypher)
    }

    async fn translate_and_run(&self, question: &str) -> RouterResult<RetrievalResult> {
        let cypher = self.translate(question).await?;
        tracing::info!(cypher = %cypher, "Generated Cypher");

        let rows = self.store.run_query(&cypher, Map::new()).await?;
        Ok(RetrievalResult::hits_with_metadata(
            rows.into_iter().map(Value::Object).collect(),
            json!({ "cypher": cypher }),
        ))
    }
}

#[async_trait]
impl Retriever for Text2CypherRetriever {
    fn tool(&self) -> ToolName {
        ToolName::Text2cypherTool
    }

    /// `top_k` is not applied; the generated query decides its own limit.
    async fn retrieve(&self, question: &str, _top_k: usize) -> RouterResult<RetrievalResult> {
        let outcome = self.translate_and_run(question).await;
        Ok(recover(self.tool(), outcome))
    }
}

/// Strip surrounding code fences (with or without a `cypher` tag) and whitespace.
fn extract_cypher(reply: &str) -> String {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = body
        .strip_prefix("cypher")
        .or_else(|| body.strip_prefix("Cypher"))
        .unwrap_or(body);
    let body = body.trim_end().strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_db::{QueryParams, Row};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedLlm {
        reply: RouterResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedLlm {
        async fn invoke(&self, prompt: &str) -> RouterResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(RouterError::Llm(e.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct CountingStore {
        schema_reads: AtomicUsize,
        fail_queries: bool,
    }

    #[async_trait]
    impl GraphStore for CountingStore {
        async fn run_query(&self, cypher: &str, _params: QueryParams) -> RouterResult<Vec<Row>> {
            if cypher.contains("db.schema.visualization") {
                self.schema_reads.fetch_add(1, Ordering::SeqCst);
                return Ok(vec![json!({
                    "nodes": [{"id": 1, "labels": ["Employee"], "name": "Employee"}],
                    "relationships": []
                })
                .as_object()
                .cloned()
                .unwrap()]);
            }
            if self.fail_queries {
                return Err(RouterError::Neo4j("Invalid input 'MATCHH'".to_string()));
            }
            Ok(vec![json!({"count": 42}).as_object().cloned().unwrap()])
        }
    }

    #[test]
    fn test_extract_cypher_strips_fences() {
        assert_eq!(extract_cypher("```cypher\nMATCH (n) RETURN n\n```"), "MATCH (n) RETURN n");
        assert_eq!(extract_cypher("```\nRETURN 1\n```\n"), "RETURN 1");
        assert_eq!(extract_cypher("  RETURN 1  "), "RETURN 1");
    }

    #[tokio::test]
    async fn test_success_carries_cypher_metadata() {
        let store = Arc::new(CountingStore::default());
        let llm = Arc::new(ScriptedLlm::replying("MATCH (e:Employee) RETURN count(e) AS count"));
        let retriever = Text2CypherRetriever::new(store, llm.clone(), Some("Node labels: Employee".to_string()));

        let result = retriever.retrieve("How many Employees?", 5).await.unwrap();

        assert_eq!(result.hit_list().unwrap()[0]["count"], json!(42));
        match &result {
            RetrievalResult::Hits { metadata: Some(meta), .. } => {
                assert_eq!(meta["cypher"], json!("MATCH (e:Employee) RETURN count(e) AS count"));
            }
            other => panic!("unexpected result {:?}", other),
        }
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Node labels: Employee"));
        assert!(prompts[0].contains("How many Employees?"));
    }

    #[tokio::test]
    async fn test_schema_read_once_when_not_supplied() {
        let store = Arc::new(CountingStore::default());
        let llm = Arc::new(ScriptedLlm::replying("RETURN 1"));
        let retriever = Text2CypherRetriever::new(store.clone(), llm, None);

        retriever.retrieve("first", 5).await.unwrap();
        retriever.retrieve("second", 5).await.unwrap();

        assert_eq!(store.schema_reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execution_failure_becomes_error_result() {
        let store = Arc::new(CountingStore {
            fail_queries: true,
            ..Default::default()
        });
        let llm = Arc::new(ScriptedLlm::replying("MATCHH (n) RETURN n"));
        let retriever = Text2CypherRetriever::new(store, llm, Some(String::new()));

        let result = retriever.retrieve("list things", 5).await.unwrap();
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn test_llm_failure_and_empty_reply_become_error_results() {
        let store = Arc::new(CountingStore::default());
        let failing = Arc::new(ScriptedLlm {
            reply: Err(RouterError::Llm("rate limited".to_string())),
            prompts: Mutex::new(Vec::new()),
        });
        let result = Text2CypherRetriever::new(store.clone(), failing, Some(String::new()))
            .retrieve("count nodes", 5)
            .await
            .unwrap();
        assert!(result.error_message().unwrap().contains("rate limited"));

        let blank = Arc::new(ScriptedLlm::replying("```cypher\n```"));
        let result = Text2CypherRetriever::new(store, blank, Some(String::new()))
            .retrieve("count nodes", 5)
            .await
            .unwrap();
        assert!(result.is_error());
    }
}
