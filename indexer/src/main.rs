use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::config::{DEFAULT_TOP_K, FREQUENCY_DUMP_LIMIT, POSITIONAL_DUMP_LIMIT};
use search_core::{Corpus, Loader, SearchHit, SearchMethod};
use tracing_subscriber::{EnvFilter, fmt};

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index a document corpus in memory and query it", long_about = None)]
struct Cli {
    /// Input path (.txt/.json/.jsonl file or a directory of them)
    #[arg(long)]
    input: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query: "exact phrase", a OR b, or plain terms
    Search {
        query: String,
        /// Evaluation method for plain term queries
        #[arg(long, default_value = "tfidf", value_parser = parse_method)]
        method: SearchMethod,
        /// Number of ranked results
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Print a table instead of JSON lines
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print statistics for both indexes as JSON
    Stats,
    /// Print the first index entries of both indexes
    Dump {
        /// Terms per index [default: 10 frequency, 5 positional]
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn parse_method(s: &str) -> Result<SearchMethod, String> {
    s.parse().map_err(|e: search_core::SearchError| e.to_string())
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let corpus = build_corpus(&cli.input)?;
    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Search { query, method, top_k, pretty } => {
            let hits = corpus.engine().search(&query, method, top_k)?;
            tracing::info!(%query, %method, hits = hits.len(), "query complete");
            if pretty {
                print_table(&mut out, &corpus, &hits)?;
            } else {
                for hit in &hits {
                    writeln!(out, "{}", serde_json::to_string(hit)?)?;
                }
            }
        }
        Commands::Stats => {
            writeln!(out, "{}", serde_json::to_string_pretty(&corpus.stats())?)?;
        }
        Commands::Dump { limit } => {
            let (frequency, positional) = dump_limits(limit);
            writeln!(out, "=== frequency index (first {frequency} terms) ===")?;
            write!(out, "{}", corpus.frequency.dump(frequency))?;
            writeln!(out, "=== positional index (first {positional} terms) ===")?;
            write!(out, "{}", corpus.positional.dump(positional))?;
        }
    }
    Ok(())
}

/// Terms to dump from the (frequency, positional) index. An explicit limit applies to both.
fn dump_limits(limit: Option<usize>) -> (usize, usize) {
    match limit {
        Some(n) => (n, n),
        None => (FREQUENCY_DUMP_LIMIT, POSITIONAL_DUMP_LIMIT),
    }
}

fn build_corpus(input: &Path) -> Result<Corpus> {
    let start = Instant::now();
    let mut corpus = Corpus::new();
    let added = Loader::new()
        .load(input, &mut corpus)
        .with_context(|| format!("loading corpus from {}", input.display()))?;
    let stats = corpus.stats();
    tracing::info!(
        docs = added,
        terms = stats.positional.unique_terms,
        took_s = start.elapsed().as_secs_f64(),
        "index build complete"
    );
    Ok(corpus)
}

fn print_table(out: &mut impl Write, corpus: &Corpus, hits: &[SearchHit]) -> Result<()> {
    writeln!(out, "{:>6}  {:>8}  {:<24}  snippet", "doc", "score", "title")?;
    for hit in hits {
        let title = corpus
            .repo
            .meta(hit.doc_id)
            .and_then(|m| m.get("title"))
            .map(String::as_str)
            .unwrap_or("-");
        let score = hit.score.map(|s| format!("{s:.4}")).unwrap_or_else(|| "-".into());
        let snippet: String = hit.text.chars().take(60).map(|c| if c.is_whitespace() { ' ' } else { c }).collect();
        writeln!(out, "{:>6}  {:>8}  {:<24}  {}", hit.doc_id, score, title, snippet)?;
    }
    Ok(())
}
