//! `linkrank`: PageRank over a corpus of linked documents.
//!
//! Two independent estimators run over the same [`LinkGraph`]:
//! - [`sample_rank`]: a single random-surfer Markov chain, counting visits.
//! - [`iterative_rank`]: synchronous power iteration to a fixed point.
//!
//! Public invariants (must not drift):
//! - **Node set**: every returned [`RankVector`] has exactly the graph's nodes as keys.
//! - **Mass**: returned vectors sum to 1 (within floating-point drift).
//! - **No aliasing**: sink normalization produces a new graph value; the caller's
//!   graph is never rewritten, so the sampler never sees the solver's view.
//! - **Determinism**: the solver is bit-for-bit deterministic; the sampler is
//!   reproducible given a seeded RNG.

pub mod corpus;
pub mod graph;
pub mod pagerank;
pub mod rank;
pub mod reverse;
pub mod sampler;
pub mod topk;
pub mod transition;

pub use graph::{GraphRef, LinkGraph};
pub use pagerank::{
    iterative_rank, iterative_rank_run, iterative_rank_with, PageRankConfig, PageRankRun,
};
pub use rank::RankVector;
pub use reverse::ReverseIndex;
pub use sampler::{sample_rank, sample_rank_seeded, sample_rank_with_rng, SampleConfig};
pub use topk::top_k;
pub use transition::transition_model;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("unknown node: {0}")]
    UnknownNode(String),
    #[error("link from {from:?} to {to:?} points outside the graph")]
    DanglingLink { from: String, to: String },
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for errors caused by the caller's input (as opposed to I/O or a bug).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyGraph
                | Error::InvalidParameter(_)
                | Error::UnknownNode(_)
                | Error::DanglingLink { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
