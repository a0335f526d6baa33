//! From a connected split graph back to an A-trail of the original graph.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::circular::Ring;
use crate::euler::{close_trail, find_eulerian_trail};
use crate::graph::{Adjacency, Multigraph, WorkGraph};

use super::types::{Atrail, Subdivision};

/// Euler trail of the split graph, mapped back onto `original`.
///
/// Steps: replace split-children by their branch node, repair crossings at
/// degree-4 vertices, start on an original vertex, read off edge indices, and
/// finally drop subdivision vertices from the vertex trail.
pub fn reconstruct(
    original: &Multigraph,
    sub: &Subdivision,
    split: &WorkGraph,
    split_map: &BTreeMap<usize, Vec<usize>>,
) -> Atrail {
    let mut trail = find_eulerian_trail(split);
    if trail.is_empty() {
        return Atrail::default();
    }

    let parent: HashMap<usize, usize> = split_map
        .iter()
        .flat_map(|(&b, children)| children.iter().map(move |&c| (c, b)))
        .collect();
    for v in trail.iter_mut() {
        if let Some(&b) = parent.get(v) {
            *v = b;
        }
    }

    let repaired = repair_crossings(&mut trail, &sub.rotation, |v| split.degree(v) == 4);
    if !repaired.is_empty() {
        debug!(count = repaired.len(), vertices = ?repaired, "repaired crossings");
    }

    if sub.is_subdivision_vertex(trail[0]) {
        trail.rotate_left(1);
    }

    let len = trail.len();
    let mut edge_trail = Vec::with_capacity(original.number_of_edges());
    for i in 0..len {
        let (a, b) = (trail[i], trail[(i + 1) % len]);
        if sub.is_subdivision_vertex(a) {
            continue;
        }
        let edge = if sub.is_subdivision_vertex(b) {
            sub.original_edge(b)
        } else {
            original.edge_between(a, b)
        };
        match edge {
            Some(e) => edge_trail.push(e),
            None => warn!(from = a, to = b, "trail step has no original edge"),
        }
    }

    trail.retain(|&v| !sub.is_subdivision_vertex(v));
    Atrail {
        edge_trail,
        vertex_trail: close_trail(&trail),
    }
}

/// Make every `candidate` vertex pass through rotationally adjacent slots.
///
/// `trail` is closed without the repeated end vertex, and every candidate
/// occurs exactly twice in it. Where the two neighbours of an occurrence sit
/// in opposite slots, the stretch strictly between the two occurrences is
/// reversed; this swaps the pairing at that vertex only. Returns the
/// repaired vertices in trail order.
pub fn repair_crossings(
    trail: &mut [usize],
    rotation: &[Vec<usize>],
    candidate: impl Fn(usize) -> bool,
) -> Vec<usize> {
    let len = trail.len();
    let mut repaired = Vec::new();
    let mut done = HashSet::new();
    for i in 0..len {
        let x = trail[i];
        if !candidate(x) || done.contains(&x) {
            continue;
        }
        let ring = Ring::new(&*trail);
        let (pred, succ) = (*ring.get(ring.prev(i)), *ring.get(ring.next(i)));
        if Ring::new(&rotation[x]).items_adjacent(&pred, &succ) != Some(false) {
            continue;
        }
        let Some(j) = (i + 1..len).find(|&j| trail[j] == x) else {
            continue;
        };
        trail[i + 1..j].reverse();
        done.insert(x);
        repaired.push(x);
    }
    repaired
}
