use std::sync::Arc;

use minirag::prelude::*;
use minirag_ollama::OllamaCompletionModel;
use tracing_subscriber::EnvFilter;

// cargo run -p minirag_ollama --example ask -- /path/to/glove.6B.50d.txt "What language is good for apps?"
#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let vectors = args.next().unwrap_or_else(|| "glove.6B.50d.txt".to_string());
    let query = args
        .next()
        .unwrap_or_else(|| "What language is good for apps?".to_string());

    let config = RagConfig {
        word_vectors: Some(vectors.into()),
        default_limit: 1,
        ..Default::default()
    };
    let service = Arc::new(config.build_retrieval()?);
    service
        .add_documents([
            ("1", "Swift is a programming language"),
            ("2", "Python is great for data science"),
        ])
        .await;

    let client = Client::new(service, OllamaCompletionModel::new(None)?)
        .with_timeout(config.generation_timeout());

    let answer = client.ask(&query).await?;
    for source in &answer.sources {
        println!("[{} {:.4}] {}", source.id(), source.score, source.content());
    }
    println!("{}", answer.text);
    Ok(())
}
