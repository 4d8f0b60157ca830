use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use chatbot::chat::TutorService;
use chatbot::corpus::Corpus;
use chatbot::notify::Notifier;
use chatbot::openrouter::OpenRouterClient;
use chatbot::retrieval::Retriever;
use chatbot::{run_server, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();

    let corpus = Corpus::load(&config.textbook_path)
        .context("cannot serve questions without the textbook")?;
    tracing::info!(
        "loaded {} textbook lines from {}",
        corpus.line_count(),
        config.textbook_path.display()
    );

    if config.model.api_key.is_empty() {
        tracing::warn!("OPENROUTER_API_KEY is not set; model calls will likely be rejected");
    }

    let retriever = Retriever::new(Arc::new(corpus), config.context_lines);
    let client = OpenRouterClient::new(&config.model)?;
    let notifier = Notifier::new(config.discord_webhook_url.clone());
    if !notifier.is_enabled() {
        tracing::info!("DISCORD_WEBHOOK_URL is not set; notifications disabled");
    }

    let chat = TutorService::new(config.model.clone(), retriever, client, notifier);

    run_server(config, chat).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
