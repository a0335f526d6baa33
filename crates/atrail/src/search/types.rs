//! Configuration, results, and errors of the A-trail search.

use std::fmt;

use crate::graph::{EmbeddingError, WorkGraph};
use crate::verify::Verdict;

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// BFS root for branch-node ordering. An isolated or out-of-range root is
    /// replaced by the first vertex of positive degree.
    pub start: usize,
    /// Upper bound on split attempts; `None` searches exhaustively.
    pub split_budget: Option<u64>,
    /// Re-check a found trail with the independent verifier.
    pub verify: bool,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            start: 0,
            split_budget: None,
            verify: true,
        }
    }
}

/// A found A-trail in both renderings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Atrail {
    /// Edge indices of the original graph, each exactly once.
    pub edge_trail: Vec<usize>,
    /// Original vertex ids; first equals last unless the trail is empty.
    pub vertex_trail: Vec<usize>,
}

/// Definitive answers of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Odd degrees, or edges spread over several components.
    NotEulerian,
    /// Every parity assignment of the branch nodes disconnects the graph.
    NoAtrail,
    Found(Atrail),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn atrail(&self) -> Option<&Atrail> {
        match self {
            SearchOutcome::Found(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_atrail(self) -> Option<Atrail> {
        match self {
            SearchOutcome::Found(t) => Some(t),
            _ => None,
        }
    }
}

/// Faults that prevent a definitive answer.
#[derive(Debug)]
pub enum AtrailError {
    Embedding(EmbeddingError),
    /// The edge code does not list the incident edges of the given graph.
    EmbeddingMismatch,
    /// `SearchCfg::split_budget` ran out before the search finished.
    BudgetExhausted { splits: u64 },
    /// With `SearchCfg::verify` set, the reconstructed trail was rejected.
    VerificationFailed(Verdict),
}

impl fmt::Display for AtrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtrailError::Embedding(err) => write!(f, "invalid embedding: {err}"),
            AtrailError::EmbeddingMismatch => {
                write!(f, "edge code does not match the incident edges of the graph")
            }
            AtrailError::BudgetExhausted { splits } => {
                write!(f, "search cancelled after {splits} split attempts")
            }
            AtrailError::VerificationFailed(verdict) => {
                write!(f, "reconstructed trail failed verification: {verdict}")
            }
        }
    }
}

impl std::error::Error for AtrailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtrailError::Embedding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmbeddingError> for AtrailError {
    fn from(err: EmbeddingError) -> Self {
        AtrailError::Embedding(err)
    }
}

/// Simple graph obtained by subdividing parallel edges, with its rotation array.
#[derive(Clone, Debug)]
pub struct Subdivision {
    /// Working copy for the search; vertices `original_vertices..` are subdivision vertices.
    pub graph: WorkGraph,
    /// `rotation[v]`: neighbour ids of `v`, slot-aligned with the edge code.
    /// Subdivision vertex `w` has `[u, v]` with `u < v`.
    pub rotation: Vec<Vec<usize>>,
    pub original_vertices: usize,
    /// `subdivided[w - original_vertices]`: original index of the edge `w` sits on.
    pub subdivided: Vec<usize>,
}

impl Subdivision {
    pub fn is_subdivision_vertex(&self, v: usize) -> bool {
        v >= self.original_vertices
    }

    /// Original edge replaced by the path through subdivision vertex `w`.
    pub fn original_edge(&self, w: usize) -> Option<usize> {
        w.checked_sub(self.original_vertices)
            .and_then(|i| self.subdivided.get(i).copied())
    }
}
