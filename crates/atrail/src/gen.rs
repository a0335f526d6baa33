//! Embedding families and a seeded random Eulerian sampler.
//!
//! Purpose
//! - Give tests and benchmarks reproducible inputs: small named embeddings
//!   with known behaviour, a 6-regular torus triangulation for search load,
//!   and random Eulerian multigraphs with shuffled rotations.
//!
//! Model (random)
//! - Union of `walks` closed walks, each of length `2..=max_walk_len`, with no
//!   two consecutive walk vertices equal. Every degree is even by construction;
//!   connectivity is not enforced, so some samples are negative cases.
//! - Each vertex's incident edges are shuffled into a random rotation.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::graph::Embedding;

/// Replay token: the same token always yields the same sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ self.index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Random Eulerian multigraph configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomEulerCfg {
    /// Vertex count; clamped to at least 3.
    pub vertices: usize,
    /// Number of closed walks to overlay.
    pub walks: usize,
    /// Longest closed walk; clamped to at least 2.
    pub max_walk_len: usize,
}

impl Default for RandomEulerCfg {
    fn default() -> Self {
        Self {
            vertices: 5,
            walks: 3,
            max_walk_len: 4,
        }
    }
}

/// Draw a random Eulerian-degree multigraph with a random rotation system.
pub fn random_eulerian(cfg: RandomEulerCfg, token: ReplayToken) -> Embedding {
    let n = cfg.vertices.max(3);
    let max_len = cfg.max_walk_len.max(2);
    let mut rng = token.rng();
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for _ in 0..cfg.walks {
        let len = rng.gen_range(2..=max_len);
        let v0 = rng.gen_range(0..n);
        let mut walk = vec![v0];
        for i in 1..len {
            let prev = walk[i - 1];
            let v = loop {
                let v = rng.gen_range(0..n);
                let closes_badly = i == len - 1 && v == v0;
                if v != prev && !closes_badly {
                    break v;
                }
            };
            walk.push(v);
        }
        for i in 0..len {
            edges.push((walk[i], walk[(i + 1) % len]));
        }
    }
    let mut rotations = vec![Vec::new(); n];
    for (e, &(u, v)) in edges.iter().enumerate() {
        rotations[u].push(e);
        rotations[v].push(e);
    }
    for rot in rotations.iter_mut() {
        rot.shuffle(&mut rng);
    }
    Embedding::new(rotations)
}

/// Cycle `0-1-...-(n-1)-0`; edge `i` joins `i` and `i+1`.
pub fn cycle(n: usize) -> Embedding {
    let rotations = (0..n).map(|i| vec![(i + n - 1) % n, i]).collect();
    Embedding::new(rotations)
}

/// Octahedron: apex 0, equator 1..=4, apex 5. Planar, 4-regular.
pub fn octahedron() -> Embedding {
    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 1),
        (5, 1),
        (5, 2),
        (5, 3),
        (5, 4),
    ];
    let rotations = vec![
        vec![1, 2, 3, 4],
        vec![0, 4, 5, 2],
        vec![0, 1, 5, 3],
        vec![0, 2, 5, 4],
        vec![0, 3, 5, 1],
        vec![1, 4, 3, 2],
    ];
    from_neighbor_rotations(&edges, &rotations)
}

/// Centre vertex 0 with one double-edge leg per label; leg `j` ends at vertex
/// `j + 1` and owns edges `2j` and `2j + 1`.
///
/// `order` is the rotation at the centre written as leg labels, each label
/// exactly twice, e.g. `[0, 0, 1, 1, 2, 2]`.
pub fn leg_bouquet(order: &[usize]) -> Embedding {
    let legs = order.iter().copied().max().map_or(0, |m| m + 1);
    let mut used = vec![0usize; legs];
    let centre = order
        .iter()
        .map(|&j| {
            let e = 2 * j + used[j];
            used[j] += 1;
            e
        })
        .collect();
    let mut rotations = vec![centre];
    rotations.extend((0..legs).map(|j| vec![2 * j, 2 * j + 1]));
    Embedding::new(rotations)
}

/// `k x k` triangulated torus, every vertex of degree 6 (requires `k >= 3`).
///
/// Vertex `(i, j)` has id `i * k + j`; edge `3v + d` leaves `v` in direction
/// `d` of `(1,0), (0,1), (-1,1)`. Rotation at a vertex runs counterclockwise:
/// `(1,0), (0,1), (-1,1), (-1,0), (0,-1), (1,-1)`.
pub fn triangulated_torus(k: usize) -> Embedding {
    assert!(k >= 3, "torus side {k} would create parallel edges");
    let id = |i: usize, j: usize| (i % k) * k + (j % k);
    let mut rotations = Vec::with_capacity(k * k);
    for i in 0..k {
        for j in 0..k {
            let v = id(i, j);
            rotations.push(vec![
                3 * v,
                3 * v + 1,
                3 * v + 2,
                3 * id(i + k - 1, j),
                3 * id(i, j + k - 1) + 1,
                3 * id(i + 1, j + k - 1) + 2,
            ]);
        }
    }
    Embedding::new(rotations)
}

/// Edge code of a simple graph given neighbour rotations.
fn from_neighbor_rotations(edges: &[(usize, usize)], rotations: &[Vec<usize>]) -> Embedding {
    let index: HashMap<(usize, usize), usize> = edges
        .iter()
        .enumerate()
        .map(|(e, &(u, v))| ((u.min(v), u.max(v)), e))
        .collect();
    let code = rotations
        .iter()
        .enumerate()
        .map(|(v, nbrs)| nbrs.iter().map(|&w| index[&(v.min(w), v.max(w))]).collect())
        .collect();
    Embedding::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Adjacency, Multigraph};

    #[test]
    fn families_are_consistent_edge_codes() {
        for emb in [
            cycle(5),
            octahedron(),
            leg_bouquet(&[0, 0, 1, 1, 2, 2]),
            leg_bouquet(&[0, 1, 0, 1]),
            triangulated_torus(3),
            triangulated_torus(4),
        ] {
            let g = Multigraph::from_embedding(&emb).unwrap();
            assert!(g.matches_embedding(&emb));
        }
    }

    #[test]
    fn torus_is_six_regular() {
        let emb = triangulated_torus(4);
        let g = Multigraph::from_embedding(&emb).unwrap();
        assert_eq!(g.number_of_vertices(), 16);
        assert_eq!(g.number_of_edges(), 48);
        assert!(g.vertices().all(|v| g.degree(v) == 6));
        // Simple: no two edges share both endpoints.
        let mut pairs: Vec<_> = g.edges().map(|(_, p)| p).collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 48);
    }

    #[test]
    fn replay_token_is_deterministic() {
        let cfg = RandomEulerCfg::default();
        let t = ReplayToken { seed: 7, index: 3 };
        assert_eq!(random_eulerian(cfg, t), random_eulerian(cfg, t));
        let g = Multigraph::from_embedding(&random_eulerian(cfg, t)).unwrap();
        assert!(g.vertices().all(|v| g.degree(v) % 2 == 0));
    }
}
