//! PageRank estimation by simulating a random surfer.
//!
//! One unbroken Markov chain: the state after each step is the start of the next,
//! and the visit frequencies approximate the stationary distribution.

use crate::graph::{GraphRef, LinkGraph};
use crate::rank::RankVector;
use crate::transition::{transition_probs_into, validate_damping};
use crate::{Error, Result};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleConfig {
    pub damping: f64,
    /// Number of steps taken by the surfer.
    pub samples: usize,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self { damping: 0.85, samples: 10_000, seed: 42 }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_samples(self.samples)
    }
}

/// Estimate PageRank from `n` steps of a random surfer, using the thread-local RNG.
pub fn sample_rank(graph: &LinkGraph, damping: f64, n: usize) -> Result<RankVector> {
    sample_rank_with_rng(graph, damping, n, &mut rand::rng())
}

/// Like [`sample_rank`], with a `ChaCha8Rng` seeded from `config.seed`.
pub fn sample_rank_seeded(graph: &LinkGraph, config: SampleConfig) -> Result<RankVector> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    sample_rank_with_rng(graph, config.damping, config.samples, &mut rng)
}

/// Like [`sample_rank`], drawing every random choice from `rng`.
pub fn sample_rank_with_rng<R: Rng>(
    graph: &LinkGraph,
    damping: f64,
    n: usize,
    rng: &mut R,
) -> Result<RankVector> {
    validate_damping(damping)?;
    validate_samples(n)?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let visits = surf(graph, damping, n, rng)?;
    let n_f64 = n as f64;
    let scores: Vec<f64> = visits.iter().map(|&c| c as f64 / n_f64).collect();
    Ok(RankVector::from_scores(graph, &scores))
}

/// Visit counts of a `steps`-long walk from a uniformly random start node.
///
/// The start node itself is not counted; only the `steps` landing nodes are.
fn surf<G: GraphRef, R: Rng>(
    graph: &G,
    damping: f64,
    steps: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = graph.node_count();
    let mut visits = vec![0usize; n];
    let mut probs = Vec::with_capacity(n);
    let mut curr = rng.random_range(0..n);

    for _ in 0..steps {
        transition_probs_into(graph, curr, damping, &mut probs);
        let next = WeightedIndex::new(&probs).map_err(|e| {
            Error::Invariant(format!("bad transition weights from node {curr}: {e}"))
        })?;
        curr = next.sample(rng);
        visits[curr] += 1;
    }
    log::debug!("random surfer took {steps} steps over {n} nodes");
    Ok(visits)
}

fn validate_samples(n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidParameter("sample count must be > 0".to_string()));
    }
    Ok(())
}
