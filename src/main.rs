use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tweetcorpus::{build_corpus, fetch_posts, Config, Lexicon, TwitterClient};

#[derive(Debug, Parser)]
#[command(
    name = "tweetcorpus",
    about = "Fetch tweets for a topic and prepare a cleaned sentiment corpus"
)]
struct Cli {
    /// Search topic/query
    topic: String,

    /// Number of tweets to collect
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Output CSV path
    #[arg(short, long, default_value = "corpus.csv")]
    out: PathBuf,

    /// Credentials file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tweetcorpus=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let client = TwitterClient::authenticate(&config.api_key, &config.api_secret).await?;

    let posts = fetch_posts(&client, &cli.topic, cli.count).await?;
    info!(fetched = posts.len(), topic = %cli.topic, "fetched posts");

    let lexicon = Lexicon::english();
    let corpus = build_corpus(&posts, &cli.topic, &lexicon);

    let file = std::fs::File::create(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    corpus.write_csv(file)?;
    info!(rows = corpus.len(), out = %cli.out.display(), "corpus written");

    Ok(())
}
