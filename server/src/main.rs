use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server", about = "Serve search queries over an in-memory corpus")]
struct Args {
    /// Corpus path (.txt/.json/.jsonl file or a directory of them)
    #[arg(long, default_value = "./corpus")]
    input: PathBuf,
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let Args { input, bind } = Args::parse();

    // Indexing is CPU-bound; the corpus is complete before any request is accepted.
    let app = tokio::task::spawn_blocking(move || server::build_app(&input))
        .await
        .context("corpus build task panicked")??;

    let listener = TcpListener::bind(bind).await.with_context(|| format!("binding {bind}"))?;
    tracing::info!(addr = %bind, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
