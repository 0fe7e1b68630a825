// src/bin/linkrank.rs
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use linkrank::corpus;
use linkrank::{
    iterative_rank_with, sample_rank, sample_rank_seeded, PageRankConfig, RankVector,
    SampleConfig,
};

/// Rank a directory of linked HTML pages with PageRank.
#[derive(Debug, Parser)]
#[command(name = "linkrank", version, about)]
struct Cli {
    /// Directory containing the `.html` pages.
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page.
    #[arg(short, long, default_value_t = 0.85)]
    damping: f64,

    /// Number of random-surfer steps for the sampling estimate.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Seed the sampler for a reproducible walk.
    #[arg(long)]
    seed: Option<u64>,

    /// Convergence threshold for power iteration.
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// Only print the K highest-ranked pages, highest first.
    #[arg(long, value_name = "K")]
    top: Option<usize>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let graph = corpus::crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;

    let sampled = match cli.seed {
        Some(seed) => sample_rank_seeded(
            &graph,
            SampleConfig { damping: cli.damping, samples: cli.samples, seed },
        ),
        None => sample_rank(&graph, cli.damping, cli.samples),
    }
    .context("sampling failed")?;
    print_ranks(
        &format!("PageRank Results from Sampling (n = {})", cli.samples),
        &sampled,
        cli.top,
    );

    let config = PageRankConfig {
        damping: cli.damping,
        tolerance: cli.tolerance,
        ..PageRankConfig::default()
    };
    let iterated = iterative_rank_with(&graph, config).context("power iteration failed")?;
    print_ranks("PageRank Results from Iteration", &iterated, cli.top);
    Ok(())
}

fn print_ranks(title: &str, ranks: &RankVector, top: Option<usize>) {
    println!("{title}");
    match top {
        Some(k) => {
            for (page, rank) in ranks.top_k(k) {
                println!("  {page}: {rank:.4}");
            }
        }
        None => {
            for (page, rank) in ranks {
                println!("  {page}: {rank:.4}");
            }
        }
    }
}
