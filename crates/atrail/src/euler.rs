//! Eulerian check and closed-trail construction.
//!
//! `find_eulerian_trail` is Hierholzer's algorithm on an explicit stack. Each
//! vertex keeps a cursor into its neighbour list, and the two entries of one
//! edge share an edge id, so an edge is consumed once from either side. Every
//! step advances a cursor or pops the stack, which keeps the whole
//! construction linear in the number of edges. Neighbour lists are scanned from
//! the front, so the result is deterministic for a given adjacency order.

use std::collections::{HashMap, VecDeque};

use crate::graph::{count_nontrivial_components, Adjacency};

/// True iff every degree is even and all vertices of positive degree share
/// one connected component.
pub fn has_eulerian_trail<G: Adjacency>(g: &G) -> bool {
    g.vertices().all(|v| g.degree(v) % 2 == 0) && count_nontrivial_components(g) <= 1
}

/// Closed walk over every edge of `g`, first vertex not repeated at the end.
///
/// Precondition: `has_eulerian_trail(g)`. An edgeless graph yields an empty trail.
pub fn find_eulerian_trail<G: Adjacency>(g: &G) -> Vec<usize> {
    debug_assert!(has_eulerian_trail(g));
    let Some(start) = g.vertices().find(|&v| g.degree(v) > 0) else {
        return Vec::new();
    };
    let (edge_of, edges) = edge_ids(g);
    let mut used = vec![false; edges];
    let mut cursor = vec![0usize; g.number_of_vertices()];
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(edges + 1);
    while let Some(&v) = stack.last() {
        let ids = &edge_of[v];
        while cursor[v] < ids.len() && used[ids[cursor[v]]] {
            cursor[v] += 1;
        }
        if cursor[v] < ids.len() {
            used[ids[cursor[v]]] = true;
            stack.push(g.neighbors(v)[cursor[v]]);
            cursor[v] += 1;
        } else {
            circuit.push(v);
            stack.pop();
        }
    }
    circuit.reverse();
    circuit.pop();
    circuit
}

/// Repeat the first vertex at the end.
pub fn close_trail(trail: &[usize]) -> Vec<usize> {
    let mut closed = trail.to_vec();
    if let Some(&first) = trail.first() {
        closed.push(first);
    }
    closed
}

/// Edge id of every neighbour-list entry, plus the number of ids.
///
/// The k-th entry of `v` in the list of `u` shares its id with the k-th entry
/// of `u` in the list of `v`.
fn edge_ids<G: Adjacency>(g: &G) -> (Vec<Vec<usize>>, usize) {
    let mut open: HashMap<(usize, usize), VecDeque<usize>> = HashMap::new();
    let mut next = 0;
    let edge_of: Vec<Vec<usize>> = g
        .vertices()
        .map(|u| {
            g.neighbors(u)
                .iter()
                .map(|&w| {
                    let paired = if w < u {
                        open.get_mut(&(w, u)).and_then(VecDeque::pop_front)
                    } else {
                        None
                    };
                    paired.unwrap_or_else(|| {
                        let id = next;
                        next += 1;
                        if u < w {
                            open.entry((u, w)).or_default().push_back(id);
                        }
                        id
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect();
    (edge_of, next)
}
