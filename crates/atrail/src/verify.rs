//! Independent A-trail check of an edge trail against an edge code.
//!
//! Purpose
//! - Confirm a trail produced by the search (or read from disk) without
//!   trusting any search data structure: endpoints are derived from the edge
//!   code here, and nothing panics on malformed input.
//!
//! Model
//! - An edge trail does not say which way its first edge is walked. Both
//!   directions are tried; the trail is valid if either one works.
//! - Walking direction fixed, the vertex shared by the current and the next
//!   edge is known. The next edge must sit in a slot next to the current one
//!   in that vertex's rotation, and after the last step the walk must be back
//!   where it started.

use std::fmt;

use crate::circular::Ring;
use crate::graph::Embedding;

/// Outcome of `verify_report`; everything except `Valid` is a rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// An edge of the edge code is not listed by exactly two distinct vertices.
    MalformedEmbedding { edge: usize },
    LengthMismatch { edges: usize, trail: usize },
    UnknownEdge { edge: usize },
    RepeatedEdge { edge: usize },
    /// `edge` does not end at `vertex`, where the walk currently stands.
    Disconnected { vertex: usize, edge: usize },
    /// `from` and `to` are not rotational neighbours at `vertex`.
    Crossing { vertex: usize, from: usize, to: usize },
    /// The walk ends at `end` instead of its start vertex `start`.
    NotClosed { start: usize, end: usize },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid A-trail"),
            Verdict::MalformedEmbedding { edge } => {
                write!(f, "edge {edge} is not listed by exactly two distinct vertices")
            }
            Verdict::LengthMismatch { edges, trail } => {
                write!(f, "trail has {trail} edges, graph has {edges}")
            }
            Verdict::UnknownEdge { edge } => write!(f, "edge {edge} is not in the graph"),
            Verdict::RepeatedEdge { edge } => write!(f, "edge {edge} is used twice"),
            Verdict::Disconnected { vertex, edge } => {
                write!(f, "edge {edge} does not end at vertex {vertex}")
            }
            Verdict::Crossing { vertex, from, to } => write!(
                f,
                "edges {from} and {to} are not rotationally adjacent at vertex {vertex}"
            ),
            Verdict::NotClosed { start, end } => {
                write!(f, "walk ends at vertex {end}, not at its start {start}")
            }
        }
    }
}

/// True iff `trail` is an A-trail of `embedding`.
pub fn verify(embedding: &Embedding, trail: &[usize]) -> bool {
    verify_report(embedding, trail).is_valid()
}

/// Like `verify`, but says why a trail is rejected.
///
/// For a walk failure the reason of the first walking direction is reported.
pub fn verify_report(embedding: &Embedding, trail: &[usize]) -> Verdict {
    let ends = match edge_ends(embedding) {
        Ok(ends) => ends,
        Err(edge) => return Verdict::MalformedEmbedding { edge },
    };
    let m = ends.len();
    if trail.len() != m {
        return Verdict::LengthMismatch {
            edges: m,
            trail: trail.len(),
        };
    }
    let Some(&first) = trail.first() else {
        return Verdict::Valid;
    };
    let mut used = vec![false; m];
    for &e in trail {
        if e >= m {
            return Verdict::UnknownEdge { edge: e };
        }
        if std::mem::replace(&mut used[e], true) {
            return Verdict::RepeatedEdge { edge: e };
        }
    }

    let forward = walk(embedding, &ends, trail, ends[first].1);
    if forward.is_valid() {
        return forward;
    }
    let backward = walk(embedding, &ends, trail, ends[first].0);
    if backward.is_valid() {
        backward
    } else {
        forward
    }
}

/// Endpoints of every edge in listing order, or the first malformed edge.
fn edge_ends(embedding: &Embedding) -> Result<Vec<(usize, usize)>, usize> {
    let total: usize = embedding.rotations().iter().map(Vec::len).sum();
    let m = total / 2;
    let mut listed: Vec<Vec<usize>> = vec![Vec::new(); m];
    for (v, rot) in embedding.rotations().iter().enumerate() {
        for &e in rot {
            match listed.get_mut(e) {
                Some(at) => at.push(v),
                None => return Err(e),
            }
        }
    }
    listed
        .iter()
        .enumerate()
        .map(|(e, at)| match at.as_slice() {
            [u, v] if u != v => Ok((*u, *v)),
            _ => Err(e),
        })
        .collect()
}

/// Walk `trail` with its first edge ending at `start`.
fn walk(embedding: &Embedding, ends: &[(usize, usize)], trail: &[usize], start: usize) -> Verdict {
    let len = trail.len();
    let mut at = start;
    for i in 0..len {
        let (cur, next) = (trail[i], trail[(i + 1) % len]);
        let ring = Ring::new(embedding.rotation(at));
        let Some(slot) = ring.position(&cur) else {
            return Verdict::Disconnected {
                vertex: at,
                edge: cur,
            };
        };
        if *ring.get(ring.next(slot)) != next && *ring.get(ring.prev(slot)) != next {
            return Verdict::Crossing {
                vertex: at,
                from: cur,
                to: next,
            };
        }
        let (a, b) = ends[next];
        at = if a == at { b } else { a };
    }
    if at == start {
        Verdict::Valid
    } else {
        Verdict::NotClosed { start, end: at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{cycle, leg_bouquet};

    /// Two triangles 0-1-2 and 0-3-4 sharing vertex 0; triangle edges sit
    /// in opposite slots at 0.
    fn crossed_bow_tie() -> Embedding {
        Embedding::new(vec![
            vec![0, 3, 5, 2],
            vec![0, 1],
            vec![1, 2],
            vec![3, 4],
            vec![4, 5],
        ])
    }

    #[test]
    fn cycle_trail_is_valid_in_both_directions() {
        let emb = cycle(4);
        assert!(verify(&emb, &[0, 1, 2, 3]));
        assert!(verify(&emb, &[3, 2, 1, 0]));
        assert!(verify(&emb, &[2, 3, 0, 1]));
    }

    #[test]
    fn crossing_fails_in_both_directions() {
        let emb = crossed_bow_tie();
        let report = verify_report(&emb, &[0, 1, 2, 3, 4, 5]);
        assert!(matches!(report, Verdict::Crossing { vertex: 0, .. }), "{report}");
        assert!(!verify(&emb, &[5, 4, 3, 2, 1, 0]));
        // Leaving each triangle through its neighbouring slot works.
        assert!(verify(&emb, &[0, 1, 2, 5, 4, 3]));
    }

    #[test]
    fn direction_of_first_edge_is_resolved() {
        // e1 is walked from leg 1 into the centre; only the second
        // interpretation of the first edge succeeds.
        let emb = leg_bouquet(&[0, 0, 1, 1, 2, 2]);
        assert!(verify(&emb, &[1, 2, 3, 4, 5, 0]));
        assert!(verify(&emb, &[0, 5, 4, 3, 2, 1]));
    }

    #[test]
    fn edge_multiset_is_checked() {
        let emb = cycle(4);
        assert_eq!(
            verify_report(&emb, &[0, 1, 2]),
            Verdict::LengthMismatch { edges: 4, trail: 3 }
        );
        assert_eq!(
            verify_report(&emb, &[0, 1, 1, 3]),
            Verdict::RepeatedEdge { edge: 1 }
        );
        assert_eq!(
            verify_report(&emb, &[0, 1, 2, 7]),
            Verdict::UnknownEdge { edge: 7 }
        );
    }

    #[test]
    fn walk_must_close() {
        // Two disjoint double edges: a closed walk cannot jump between them.
        let emb = Embedding::new(vec![vec![0, 1], vec![0, 1], vec![2, 3], vec![2, 3]]);
        assert!(!verify(&emb, &[0, 1, 2, 3]));
        assert!(!verify(&emb, &[0, 2, 1, 3]));
    }

    #[test]
    fn empty_trail_needs_edgeless_graph() {
        assert!(verify(&Embedding::new(vec![vec![], vec![]]), &[]));
        assert!(!verify(&cycle(3), &[]));
    }

    #[test]
    fn malformed_embedding_is_rejected_without_panic() {
        let loop_edge = Embedding::new(vec![vec![0, 0]]);
        assert_eq!(
            verify_report(&loop_edge, &[0]),
            Verdict::MalformedEmbedding { edge: 0 }
        );
        let dangling = Embedding::new(vec![vec![0, 4], vec![0, 1]]);
        assert!(!verify(&dangling, &[0, 1]));
    }
}
