//! A-trail search and verification for embedded Eulerian graphs.
//!
//! An A-trail is a closed walk that uses every edge exactly once and, at every
//! vertex, leaves along an edge that is rotationally adjacent to the one it
//! arrived on. Routing one scaffold strand over a wireframe mesh needs such a
//! walk; a crossing at a vertex cannot be folded as a single strand.
//!
//! Layout
//! - `circular`: ring indexing and the two adjacent-slot pairings (`Parity`).
//! - `graph`: edge code (`Embedding`), original multigraph, working graph with undo.
//! - `euler`: Eulerian check and Hierholzer-style trail construction.
//! - `search`: subdivision, branch nodes, parity-split backtracking, reconstruction.
//! - `verify`: independent A-trail check of an edge trail against an edge code.
//! - `io`: edge-code and trail text formats.
//! - `gen`: deterministic embedding families and a seeded random sampler.
//!
//! API Policy
//! - The crate is consumed by the workspace CLI; there is no stable public API yet.

pub mod circular;
pub mod euler;
pub mod gen;
pub mod graph;
pub mod io;
pub mod search;
pub mod verify;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use search::{search, search_embedding, Atrail, AtrailError, SearchCfg, SearchOutcome};
pub use verify::{verify, verify_report, Verdict};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::circular::{Parity, Ring};
    pub use crate::euler::{find_eulerian_trail, has_eulerian_trail};
    pub use crate::graph::{Adjacency, Embedding, EmbeddingError, Multigraph, WorkGraph};
    pub use crate::search::{
        search, search_embedding, Atrail, AtrailError, SearchCfg, SearchOutcome,
    };
    pub use crate::verify::{verify, verify_report, Verdict};
}
