//! PageRank by synchronous power iteration.

use crate::graph::LinkGraph;
use crate::rank::RankVector;
use crate::reverse::ReverseIndex;
use crate::transition::validate_damping;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// Safety cap on rounds; the solver normally stops on `tolerance` long before.
    pub max_iterations: usize,
    /// Stop once no node's rank moves by more than this in one round.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, max_iterations: 10_000, tolerance: 1e-3 }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Result of a solver run, with convergence details.
#[derive(Debug, Clone)]
pub struct PageRankRun {
    pub scores: RankVector,
    pub iterations: usize,
    /// Largest per-node change in the final round.
    pub max_diff: f64,
    pub converged: bool,
}

/// PageRank with the default tolerance (0.001).
pub fn iterative_rank(graph: &LinkGraph, damping: f64) -> Result<RankVector> {
    iterative_rank_with(graph, PageRankConfig { damping, ..PageRankConfig::default() })
}

pub fn iterative_rank_with(graph: &LinkGraph, config: PageRankConfig) -> Result<RankVector> {
    iterative_rank_run(graph, config).map(|run| run.scores)
}

/// Run power iteration until the largest per-node change is `<= config.tolerance`.
///
/// Every round computes the whole new vector from the previous one:
///
/// \[
///   r'(p) = \frac{1-d}{N} + d \sum_{o \to p} \frac{r(o)}{\mathrm{outdeg}(o)}
/// \]
///
/// over the sink-normalized graph. Hitting `max_iterations` is not an error: the last
/// vector is returned with `converged == false`.
pub fn iterative_rank_run(graph: &LinkGraph, config: PageRankConfig) -> Result<PageRankRun> {
    config.validate()?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let index = ReverseIndex::build(graph);
    let n = index.len();
    let n_f64 = n as f64;
    let damping = config.damping;
    let teleport = (1.0 - damping) / n_f64;

    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let mut iterations = 0usize;
    let mut max_diff = f64::INFINITY;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        for (p, slot) in new_scores.iter_mut().enumerate() {
            let mut inflow = 0.0;
            for &o in index.incoming_at(p) {
                let deg = index.out_degree_at(o);
                if deg == 0 {
                    return Err(Error::Invariant(format!(
                        "node {:?} has no outbound links after sink normalization",
                        index.name_at(o)
                    )));
                }
                inflow += scores[o] / deg as f64;
            }
            *slot = teleport + damping * inflow;
        }

        max_diff = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        std::mem::swap(&mut scores, &mut new_scores);
        log::debug!("round {iterations}: max rank change {max_diff:e}");
        if max_diff <= config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        log::info!("power iteration converged after {iterations} rounds over {n} nodes");
    } else {
        log::warn!(
            "power iteration stopped at the {} round cap (max change {max_diff:e} > {})",
            config.max_iterations,
            config.tolerance
        );
    }

    Ok(PageRankRun {
        scores: RankVector::from_scores(graph, &scores),
        iterations,
        max_diff,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cycle_is_uniform() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec!["A"])]).unwrap();
        let run = iterative_rank_run(&g, PageRankConfig::default()).unwrap();
        assert!(run.converged);
        assert!((run.scores.get("A").unwrap() - 0.5).abs() < 1e-3);
        assert!((run.scores.get("B").unwrap() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn single_sink_node_is_one() {
        let g = LinkGraph::new([("A", Vec::<&str>::new())]).unwrap();
        let r = iterative_rank(&g, 0.85).unwrap();
        assert!((r.get("A").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_config() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec!["A"])]).unwrap();
        for tolerance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = PageRankConfig { tolerance, ..Default::default() };
            assert!(matches!(iterative_rank_with(&g, cfg), Err(Error::InvalidParameter(_))));
        }
        let cfg = PageRankConfig { max_iterations: 0, ..Default::default() };
        assert!(matches!(iterative_rank_with(&g, cfg), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            iterative_rank(&LinkGraph::default(), 0.85),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn cap_reports_non_convergence() {
        // Starts uniform, so a skewed graph cannot settle in one round.
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["b"])]).unwrap();
        let cfg = PageRankConfig { max_iterations: 1, tolerance: 1e-12, ..Default::default() };
        let run = iterative_rank_run(&g, cfg).unwrap();
        assert!(!run.converged);
        assert_eq!(run.iterations, 1);
        assert!(run.max_diff > 1e-12);
        assert!((run.scores.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sink_mass_is_redistributed() {
        // 1 -> 2 -> 3, 3 is a sink: without normalization mass would leak.
        let g = LinkGraph::new([("1", vec!["2"]), ("2", vec!["3"]), ("3", vec![])]).unwrap();
        let r = iterative_rank(&g, 0.85).unwrap();
        assert!((r.sum() - 1.0).abs() < 1e-9);
        assert!(r.get("3").unwrap() > r.get("2").unwrap());
        assert!(r.get("2").unwrap() > r.get("1").unwrap());
    }
}
