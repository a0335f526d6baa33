//! Parallel-edge subdivision and the rotation array.

use tracing::info;

use crate::graph::{Adjacency, Embedding, Multigraph, WorkGraph};

use super::types::Subdivision;

/// Make the graph simple: every parallel edge after the first (in edge-index
/// order) between a pair gets a fresh degree-2 vertex in its middle.
///
/// The rotation array is written slot by slot from the edge code, so an
/// inserted vertex lands exactly in the slot of the edge it replaces.
/// Precondition: `graph` was built from `embedding` (no self-loops).
pub fn subdivide(graph: &Multigraph, embedding: &Embedding) -> Subdivision {
    let n = graph.number_of_vertices();
    let mut first_seen = std::collections::HashSet::new();
    let mut subdivided = Vec::new();
    let mut via: Vec<Option<usize>> = Vec::with_capacity(graph.number_of_edges());
    for (e, pair) in graph.edges() {
        if first_seen.insert(pair) {
            via.push(None);
        } else {
            via.push(Some(n + subdivided.len()));
            subdivided.push(e);
        }
    }

    let mut work = WorkGraph::with_vertices(n + subdivided.len());
    let mut rotation: Vec<Vec<usize>> = embedding
        .rotations()
        .iter()
        .enumerate()
        .map(|(v, rot)| {
            rot.iter()
                .map(|&e| {
                    via[e].unwrap_or_else(|| {
                        let (a, b) = graph.ends(e);
                        if a == v {
                            b
                        } else {
                            a
                        }
                    })
                })
                .collect()
        })
        .collect();
    for (e, (u, v)) in graph.edges() {
        match via[e] {
            None => work.add_edge(u, v),
            Some(w) => {
                work.add_edge(u, w);
                work.add_edge(w, v);
            }
        }
    }
    rotation.extend(subdivided.iter().map(|&e| {
        let (u, v) = graph.ends(e);
        vec![u, v]
    }));

    if !subdivided.is_empty() {
        info!(
            count = subdivided.len(),
            "multigraph: subdivided parallel edges"
        );
    }
    Subdivision {
        graph: work,
        rotation,
        original_vertices: n,
        subdivided,
    }
}
