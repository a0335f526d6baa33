//! Edge code, original multigraph, and the reversible working graph.
//!
//! - `Embedding`: per-vertex cyclic order of incident edge indices (the edge code).
//! - `Multigraph`: the read-only original graph built from an edge code. Edge
//!   indices are stable and it is the only source for final edge lookups.
//! - `WorkGraph`: simple graph that the parity search splits destructively.
//!   Every split pushes a record; `undo_split` restores the exact adjacency
//!   lists (order included) so a failed branch leaves the graph `==` to its
//!   state on entry.

use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

/// Read access shared by the original and the working graph.
pub trait Adjacency {
    fn number_of_vertices(&self) -> usize;

    /// Neighbours of `v`, one entry per incident edge end.
    fn neighbors(&self, v: usize) -> &[usize];

    fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    fn vertices(&self) -> Range<usize> {
        0..self.number_of_vertices()
    }
}

/// Connected components among vertices of positive degree (isolated vertices ignored).
pub fn count_nontrivial_components<G: Adjacency>(g: &G) -> usize {
    let n = g.number_of_vertices();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    let mut count = 0;
    for s in g.vertices() {
        if visited[s] || g.degree(s) == 0 {
            continue;
        }
        count += 1;
        visited[s] = true;
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            for &w in g.neighbors(u) {
                if !visited[w] {
                    visited[w] = true;
                    queue.push_back(w);
                }
            }
        }
    }
    count
}

/// Rotation system given as edge indices: `rotation(v)` lists the edges at `v`
/// in cyclic order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Embedding {
    rotations: Vec<Vec<usize>>,
}

impl Embedding {
    /// Wrap raw rotations. Consistency is checked by `Multigraph::from_embedding`.
    pub fn new(rotations: Vec<Vec<usize>>) -> Self {
        Self { rotations }
    }

    pub fn number_of_vertices(&self) -> usize {
        self.rotations.len()
    }

    /// Half the number of listed edge ends.
    pub fn number_of_edges(&self) -> usize {
        self.rotations.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn rotation(&self, v: usize) -> &[usize] {
        &self.rotations[v]
    }

    pub fn rotations(&self) -> &[Vec<usize>] {
        &self.rotations
    }
}

/// Structural problems of an edge code or edge list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbeddingError {
    /// The rotations list an odd number of edge ends.
    OddEdgeEnds { total: usize },
    /// An edge index is not below the edge count.
    EdgeOutOfRange { vertex: usize, edge: usize, edges: usize },
    /// An edge endpoint is not a vertex of the graph.
    VertexOutOfRange { edge: usize, vertex: usize, vertices: usize },
    /// Both ends of an edge sit at the same vertex.
    SelfLoop { vertex: usize, edge: usize },
    /// An edge index is listed by a number of rotations other than two.
    EdgeEnds { edge: usize, listed: usize },
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::OddEdgeEnds { total } => {
                write!(f, "edge code lists {total} edge ends, expected an even count")
            }
            EmbeddingError::EdgeOutOfRange {
                vertex,
                edge,
                edges,
            } => write!(
                f,
                "vertex {vertex} lists edge {edge}, but the graph has {edges} edges"
            ),
            EmbeddingError::VertexOutOfRange {
                edge,
                vertex,
                vertices,
            } => write!(
                f,
                "edge {edge} ends at vertex {vertex}, but the graph has {vertices} vertices"
            ),
            EmbeddingError::SelfLoop { vertex, edge } => write!(
                f,
                "edge {edge} is a self-loop at vertex {vertex}; self-loops are not supported"
            ),
            EmbeddingError::EdgeEnds { edge, listed } => {
                write!(f, "edge {edge} is listed {listed} times, expected exactly 2")
            }
        }
    }
}

impl std::error::Error for EmbeddingError {}

/// Undirected multigraph with edge indices `0..m` and no self-loops.
///
/// Neighbour lists follow edge-index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multigraph {
    ends: Vec<(usize, usize)>,
    adj: Vec<Vec<usize>>,
}

impl Multigraph {
    /// Build the graph whose edge `e` joins the two vertices listing `e`.
    pub fn from_embedding(embedding: &Embedding) -> Result<Self, EmbeddingError> {
        let total: usize = embedding.rotations().iter().map(Vec::len).sum();
        if total % 2 == 1 {
            return Err(EmbeddingError::OddEdgeEnds { total });
        }
        let m = total / 2;
        let mut listed: Vec<Vec<usize>> = vec![Vec::new(); m];
        for (v, rot) in embedding.rotations().iter().enumerate() {
            for &e in rot {
                if e >= m {
                    return Err(EmbeddingError::EdgeOutOfRange {
                        vertex: v,
                        edge: e,
                        edges: m,
                    });
                }
                listed[e].push(v);
            }
        }
        let mut edges = Vec::with_capacity(m);
        for (e, at) in listed.iter().enumerate() {
            match at.as_slice() {
                [u, v] if u == v => return Err(EmbeddingError::SelfLoop { vertex: *u, edge: e }),
                [u, v] => edges.push((*u, *v)),
                _ => {
                    return Err(EmbeddingError::EdgeEnds {
                        edge: e,
                        listed: at.len(),
                    })
                }
            }
        }
        Self::from_edges(embedding.number_of_vertices(), &edges)
    }

    /// Build from an edge list; edge `i` gets index `i`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, EmbeddingError> {
        let mut adj = vec![Vec::new(); n];
        let mut ends = Vec::with_capacity(edges.len());
        for (e, &(u, v)) in edges.iter().enumerate() {
            for x in [u, v] {
                if x >= n {
                    return Err(EmbeddingError::VertexOutOfRange {
                        edge: e,
                        vertex: x,
                        vertices: n,
                    });
                }
            }
            if u == v {
                return Err(EmbeddingError::SelfLoop { vertex: u, edge: e });
            }
            adj[u].push(v);
            adj[v].push(u);
            ends.push((u.min(v), u.max(v)));
        }
        Ok(Self { ends, adj })
    }

    pub fn number_of_edges(&self) -> usize {
        self.ends.len()
    }

    /// Endpoints of edge `e` as `(smaller, larger)`.
    pub fn ends(&self, e: usize) -> (usize, usize) {
        self.ends[e]
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_ {
        self.ends.iter().copied().enumerate()
    }

    /// Lowest edge index joining `u` and `v`.
    pub fn edge_between(&self, u: usize, v: usize) -> Option<usize> {
        let key = (u.min(v), u.max(v));
        self.ends.iter().position(|&p| p == key)
    }

    /// True iff `embedding` lists, at every vertex, exactly the edges incident to it,
    /// each one once.
    pub fn matches_embedding(&self, embedding: &Embedding) -> bool {
        if embedding.number_of_vertices() != self.number_of_vertices() {
            return false;
        }
        let mut incident = vec![Vec::new(); self.number_of_vertices()];
        for (e, (a, b)) in self.edges() {
            incident[a].push(e);
            incident[b].push(e);
        }
        embedding
            .rotations()
            .iter()
            .zip(incident)
            .all(|(rot, expected)| {
                let mut listed = rot.clone();
                listed.sort_unstable();
                listed == expected
            })
    }
}

impl Adjacency for Multigraph {
    fn number_of_vertices(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }
}

/// Adjacency lists of every vertex touched by one split, captured before it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SplitRecord {
    first_new: usize,
    saved: Vec<(usize, Vec<usize>)>,
}

/// Simple undirected graph with reversible vertex splits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkGraph {
    adj: Vec<Vec<usize>>,
    undo: Vec<SplitRecord>,
}

impl WorkGraph {
    pub fn with_vertices(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            undo: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self) -> usize {
        self.adj.push(Vec::new());
        self.adj.len() - 1
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert_ne!(u, v, "working graph has no self-loops");
        self.adj[u].push(v);
        self.adj[v].push(u);
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].contains(&v)
    }

    pub fn number_of_edges(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Number of splits that `undo_split` can still revert.
    pub fn pending_splits(&self) -> usize {
        self.undo.len()
    }

    /// Replace `v` by one fresh vertex per pair, joined to both vertices of
    /// the pair, then drop all edges at `v`. Every pair member must currently
    /// be a neighbour of `v`. Returns the fresh vertices in pair order.
    pub fn split_vertex(&mut self, v: usize, pairs: &[(usize, usize)]) -> Vec<usize> {
        let mut saved = Vec::with_capacity(self.adj[v].len() + 1);
        saved.push((v, self.adj[v].clone()));
        for &x in &self.adj[v] {
            saved.push((x, self.adj[x].clone()));
        }
        let first_new = self.adj.len();
        let mut fresh = Vec::with_capacity(pairs.len());
        for &(a, b) in pairs {
            debug_assert!(self.has_edge(v, a) && self.has_edge(v, b));
            let w = self.add_vertex();
            self.add_edge(w, a);
            self.add_edge(w, b);
            fresh.push(w);
        }
        self.clear_vertex(v);
        self.undo.push(SplitRecord { first_new, saved });
        fresh
    }

    /// Revert the most recent split. Returns false if there is none.
    pub fn undo_split(&mut self) -> bool {
        let Some(record) = self.undo.pop() else {
            return false;
        };
        self.adj.truncate(record.first_new);
        for (x, list) in record.saved {
            self.adj[x] = list;
        }
        true
    }

    fn clear_vertex(&mut self, v: usize) {
        let nbrs = std::mem::take(&mut self.adj[v]);
        for x in nbrs {
            if let Some(pos) = self.adj[x].iter().position(|&y| y == v) {
                self.adj[x].remove(pos);
            }
        }
    }
}

impl Adjacency for WorkGraph {
    fn number_of_vertices(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }
}
