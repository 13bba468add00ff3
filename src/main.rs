//! CLI interface for exploring word2vec models

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
use wordvec::{
    load_path, CharsetFilter, Evaluator, Format, LoadOptions, Metric, Vector, VectorStore,
};

#[derive(Parser)]
#[command(name = "wordvec")]
#[command(about = "Query word2vec models with word arithmetic", long_about = None)]
struct Cli {
    /// Model file to load
    #[arg(short, long, default_value = "data.model")]
    file: PathBuf,

    /// Model file format: text, bin32 or bin64 (also 0, 32, 64)
    #[arg(short = 'b', long, default_value = "text")]
    format: Format,

    /// Fail if a binary header's vocab size differs from the record count
    #[arg(long)]
    strict: bool,

    /// Keep vocabulary entries containing brackets or punctuation
    #[arg(long)]
    no_filter: bool,

    /// Ranking metric. Cosine ranks a normalized query; Euclidean ranks the
    /// raw composite so distances stay comparable with the stored vectors.
    #[arg(long, value_enum, default_value = "cosine")]
    metric: MetricArg,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum MetricArg {
    Cosine,
    Euclidean,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Cosine => Metric::Cosine,
            MetricArg::Euclidean => Metric::Euclidean,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one expression and print the closest words
    Query {
        /// Expression such as "king - man + woman"
        expression: String,
        /// Number of results to return
        #[arg(short, long, default_value = "4")]
        n: usize,
    },
    /// Read expressions from stdin, one per line
    Repl {
        /// Number of results to return
        #[arg(short, long, default_value = "4")]
        n: usize,
    },
    /// Print vocabulary size and dimension
    Info,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    query: &'a str,
    rank: usize,
    word: &'a str,
    score: f64,
}

/// Normalize the query only where the metric is scale invariant.
fn prepare_query(mut query: Vector, metric: Metric) -> Vector {
    if metric == Metric::Cosine {
        query.normalize();
    }
    query
}

fn run_query(
    store: &VectorStore,
    metric: Metric,
    expression: &str,
    n: usize,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let query = prepare_query(Evaluator::new(store).evaluate(expression)?, metric);

    let results = store.search(&query, metric, n)?;
    if results.is_empty() {
        writeln!(out, "No results found")?;
    }
    for (i, entry) in results.iter().enumerate() {
        if json {
            let row = ResultRow {
                query: query.word(),
                rank: i + 1,
                word: entry.word(),
                score: entry.score,
            };
            writeln!(out, "{}", serde_json::to_string(&row)?)?;
        } else {
            writeln!(out, "{} {:.6}", entry.word(), entry.score)?;
        }
    }
    Ok(())
}

fn run_repl(store: &VectorStore, metric: Metric, n: usize, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = run_query(store, metric, line, n, json, &mut stdout) {
            warn!(query = line, "query failed");
            writeln!(stdout, "error: {}", e)?;
        }
    }
    writeln!(stdout)?;
    Ok(())
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordvec=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = LoadOptions::new(cli.format);
    options.strict_vocab_size = cli.strict;

    let mut store = load_path(&cli.file, &options)?;
    if !cli.no_filter {
        store = store.filter(&CharsetFilter::default());
    }

    let metric = Metric::from(cli.metric);
    match cli.command {
        Commands::Query { expression, n } => {
            run_query(&store, metric, &expression, n, cli.json, &mut io::stdout())?;
        }
        Commands::Repl { n } => run_repl(&store, metric, n, cli.json)?,
        Commands::Info => {
            println!("Words: {}", store.len());
            match store.dimension() {
                Some(dim) => println!("Dimension: {}", dim),
                None => println!("Dimension: (empty model)"),
            }
        }
    }
    Ok(())
}
