//! Branch-node enumeration.

use std::collections::VecDeque;

use crate::graph::Adjacency;

/// Smallest degree of a vertex that the parity search has to decide.
///
/// Degree-2 vertices have a single pairing; degree-4 vertices are settled
/// after the fact by trail repair.
pub const BRANCH_DEGREE: usize = 6;

/// Vertices of degree at least `BRANCH_DEGREE` in BFS discovery order from `start`.
///
/// Only the component of `start` is visited; an out-of-range `start` yields
/// no branch nodes.
pub fn enumerate_branch_nodes<G: Adjacency>(g: &G, start: usize) -> Vec<usize> {
    let n = g.number_of_vertices();
    if start >= n {
        return Vec::new();
    }
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    let mut branch = Vec::new();
    while let Some(u) = queue.pop_front() {
        if g.degree(u) >= BRANCH_DEGREE {
            branch.push(u);
        }
        for &w in g.neighbors(u) {
            if !seen[w] {
                seen[w] = true;
                queue.push_back(w);
            }
        }
    }
    branch
}

/// `start` if it has an edge, else the first vertex that does.
pub(crate) fn branch_root<G: Adjacency>(g: &G, start: usize) -> usize {
    if start < g.number_of_vertices() && g.degree(start) > 0 {
        return start;
    }
    g.vertices().find(|&v| g.degree(v) > 0).unwrap_or(start)
}
