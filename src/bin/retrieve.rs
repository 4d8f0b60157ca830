use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatbot::corpus::Corpus;
use chatbot::retrieval::{Retriever, DEFAULT_CONTEXT_LINES};

#[derive(Parser, Debug)]
#[command(name = "retrieve")]
#[command(about = "Show the keywords and textbook passages a question retrieves")]
struct Cli {
    /// Question to retrieve passages for
    question: String,
    #[arg(long, env = "TEXTBOOK_PATH", default_value = "./dataset.txt")]
    corpus: PathBuf,
    #[arg(long, default_value_t = DEFAULT_CONTEXT_LINES)]
    context_lines: usize,
    /// Print the retrieval as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let corpus = Corpus::load(&cli.corpus)
        .with_context(|| format!("failed loading textbook {}", cli.corpus.display()))?;
    let line_count = corpus.line_count();

    let retriever = Retriever::new(corpus.into(), cli.context_lines);
    let retrieval = retriever.retrieve(&cli.question);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&retrieval)?);
        return Ok(());
    }

    println!("Textbook lines: {}", line_count);
    println!("Keywords: {}", retrieval.keywords.join(", "));
    if retrieval.is_empty() {
        println!("No passages found.");
        return Ok(());
    }

    for (idx, passage) in retrieval.passages.iter().enumerate() {
        println!("--- passage {} ---", idx + 1);
        println!("{}", passage);
        println!();
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
