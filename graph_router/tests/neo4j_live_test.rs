use graph_router::bootstrap::build_router;
use graph_router::ToolName;
use graphrag_config::{load_dotenv, RouterSettings};

/// End-to-end routing against a real Neo4j instance and OpenAI.
///
/// Needs NEO4J_URI / NEO4J_USERNAME / NEO4J_PASSWORD pointing at a graph with
/// a `chunkEmbeddings` vector index, and OPENAI_API_KEY.
#[tokio::test]
#[ignore] // Requires running services
async fn test_live_routing() {
    load_dotenv();
    let settings = RouterSettings::from_env().expect("valid settings");
    let router = build_router(&settings).await.expect("Neo4j reachable");

    let schema = router.route("Show me the graph schema").await.unwrap();
    assert_eq!(schema.tool, ToolName::SchemaTool);

    let vector = router
        .route("tell me something interesting about the documents")
        .await
        .unwrap();
    assert_eq!(vector.tool, ToolName::VectorTool);
    assert!(vector.result.is_ok(), "vector search failed: {:?}", vector.result);
}
