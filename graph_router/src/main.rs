use anyhow::Context;
use clap::Parser;
use graph_router::bootstrap::build_router;
use graphrag_config::{load_dotenv, RouterSettings};
use graphrag_observability::{init_tracing, TracingConfig};

/// Route a question to the best retrieval tool and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "graph-router", version)]
struct Args {
    /// User question
    #[arg(long = "q")]
    question: String,

    /// Override the number of results (defaults to ROUTER_TOP_K or 5)
    #[arg(long)]
    top_k: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    load_dotenv();
    init_tracing(TracingConfig::for_service("graph-router"));

    let mut settings = RouterSettings::from_env().context("Invalid router configuration")?;
    if let Some(top_k) = args.top_k.filter(|k| *k > 0) {
        settings.top_k = top_k;
    }

    let router = build_router(&settings)
        .await
        .context("Failed to initialize router")?;

    let decision = router
        .route(&args.question)
        .await
        .context("Routing failed")?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
