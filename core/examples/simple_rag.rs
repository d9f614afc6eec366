use minirag::prelude::*;
use tracing_subscriber::EnvFilter;

// cargo run --example simple_rag -- /path/to/glove.6B.50d.txt
#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "glove.6B.50d.txt".to_string());
    let config = RagConfig {
        word_vectors: Some(path.into()),
        ..Default::default()
    };
    let service = config.build_retrieval()?;

    service
        .add_documents([
            ("1", "Swift is a programming language"),
            ("2", "Python is great for data science"),
        ])
        .await;

    let query = "What language is good for apps?";
    let results = service.retrieve(query, 1).await;
    println!("query: {query}");
    for hit in &results {
        println!("  {} ({:.4}): {}", hit.id(), hit.score, hit.content());
    }
    println!("context: {}", build_context(&results));
    Ok(())
}
