//! A-trail search: subdivision, branch nodes, parity splits, reconstruction.
//!
//! Purpose
//! - Decide whether an embedded Eulerian multigraph has an A-trail and, if so,
//!   produce one as an edge trail over the original edge indices and as a
//!   closed vertex trail.
//!
//! Why this design
//! - Only vertices of degree >= 6 ("branch nodes") need a decision. Degree-2
//!   vertices have one pairing, and a degree-4 vertex can always be fixed after
//!   the fact by reversing the stretch between its two visits.
//! - Splitting a branch node under a parity pins its transitions to adjacent
//!   slot pairs; the working graph stays connected iff some Euler circuit uses
//!   exactly those transitions. So the search is a DFS over per-node parities
//!   with connectivity as the only pruning test, and it is complete.
//! - Parallel edges are subdivided first so every neighbour is a distinct
//!   vertex and slot bookkeeping works on vertex ids.
//!
//! Layout
//! - `types.rs` (config, outcomes, errors), `subdivide.rs`, `branch.rs`,
//!   `split.rs` (the backtracking context), `reconstruct.rs`.

mod branch;
mod reconstruct;
mod split;
mod subdivide;
mod types;

use tracing::{debug, info, warn};

use crate::euler::has_eulerian_trail;
use crate::graph::{Embedding, Multigraph};
use crate::verify::verify_report;

pub use branch::{enumerate_branch_nodes, BRANCH_DEGREE};
pub use reconstruct::{reconstruct, repair_crossings};
pub use split::SplitSearch;
pub use subdivide::subdivide;
pub use types::{Atrail, AtrailError, SearchCfg, SearchOutcome, Subdivision};

/// Build the graph from the edge code, then `search`.
pub fn search_embedding(
    embedding: &Embedding,
    cfg: SearchCfg,
) -> Result<SearchOutcome, AtrailError> {
    let graph = Multigraph::from_embedding(embedding)?;
    search(&graph, embedding, cfg)
}

/// Search an A-trail of `graph` under the rotation system `embedding`.
///
/// `embedding` must list, at every vertex, exactly the edges incident to it.
pub fn search(
    graph: &Multigraph,
    embedding: &Embedding,
    cfg: SearchCfg,
) -> Result<SearchOutcome, AtrailError> {
    if !graph.matches_embedding(embedding) {
        return Err(AtrailError::EmbeddingMismatch);
    }
    info!("checking whether the graph has an Eulerian trail");
    if !has_eulerian_trail(graph) {
        info!("graph has no Eulerian trail, so it cannot have an A-trail");
        return Ok(SearchOutcome::NotEulerian);
    }
    info!("graph has an Eulerian trail, checking for an A-trail");

    let mut sub = subdivide(graph, embedding);
    let root = branch::branch_root(&sub.graph, cfg.start);
    let branch_nodes = enumerate_branch_nodes(&sub.graph, root);
    if branch_nodes.is_empty() {
        info!("no branch nodes, every Euler circuit can be repaired");
    } else {
        info!(count = branch_nodes.len(), nodes = ?branch_nodes, "branch nodes");
    }

    let work = std::mem::take(&mut sub.graph);
    let mut splits =
        SplitSearch::new(work, &sub.rotation, &branch_nodes).with_budget(cfg.split_budget);
    if !splits.run()? {
        info!(attempts = splits.attempts(), "no A-trail for this embedding");
        return Ok(SearchOutcome::NoAtrail);
    }
    info!(attempts = splits.attempts(), "found an A-trail");
    let (split_graph, split_map) = splits.into_parts();

    let atrail = reconstruct(graph, &sub, &split_graph, &split_map);
    debug!(edges = ?atrail.edge_trail, "edge trail");
    if cfg.verify {
        let verdict = verify_report(embedding, &atrail.edge_trail);
        if !verdict.is_valid() {
            warn!(%verdict, "reconstructed trail failed independent verification");
            return Err(AtrailError::VerificationFailed(verdict));
        }
    }
    Ok(SearchOutcome::Found(atrail))
}
