//! Parity-split backtracking over the branch nodes.
//!
//! Splitting a branch node under a parity replaces it by one degree-2 child
//! per adjacent slot pair. A partial assignment survives only while the
//! working graph stays connected; the first complete assignment that does
//! is the answer.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::circular::{Parity, Ring};
use crate::graph::{count_nontrivial_components, WorkGraph};

use super::types::AtrailError;

/// DFS state: working graph (with its undo stack), split map, and parity history.
///
/// `parities[d]` is the parity under which `branch[d]` is currently split;
/// `split_map[branch[d]]` holds its children in pair order.
#[derive(Debug)]
pub struct SplitSearch<'a> {
    graph: WorkGraph,
    rotation: &'a [Vec<usize>],
    branch: &'a [usize],
    depth_of: HashMap<usize, usize>,
    split_map: BTreeMap<usize, Vec<usize>>,
    parities: Vec<Parity>,
    budget: Option<u64>,
    attempts: u64,
}

impl<'a> SplitSearch<'a> {
    pub fn new(graph: WorkGraph, rotation: &'a [Vec<usize>], branch: &'a [usize]) -> Self {
        let depth_of = branch.iter().enumerate().map(|(d, &v)| (v, d)).collect();
        Self {
            graph,
            rotation,
            branch,
            depth_of,
            split_map: BTreeMap::new(),
            parities: Vec::with_capacity(branch.len()),
            budget: None,
            attempts: 0,
        }
    }

    pub fn with_budget(mut self, budget: Option<u64>) -> Self {
        self.budget = budget;
        self
    }

    /// Depth-first over `(depth, parity)`, odd_even before even_odd at every
    /// depth. Returns whether every branch node got a connected split; on
    /// `false` or error all splits have been undone.
    pub fn run(&mut self) -> Result<bool, AtrailError> {
        let k = self.branch.len();
        if k == 0 {
            return Ok(true);
        }
        let [first, last] = Parity::BOTH;
        let mut depth = 0;
        let mut parity = first;
        loop {
            if let Err(err) = self.charge() {
                self.unwind();
                return Err(err);
            }
            if self.split_and_check(depth, parity) {
                if depth + 1 == k {
                    return Ok(true);
                }
                depth += 1;
                parity = first;
                continue;
            }
            // Move to the next untried (depth, parity), popping exhausted levels.
            loop {
                if parity != last {
                    parity = parity.other();
                    break;
                }
                debug!(
                    vertex = self.branch[depth],
                    depth,
                    "both branches disconnect the graph, backtracking"
                );
                if depth == 0 {
                    return Ok(false);
                }
                depth -= 1;
                parity = self.parities[depth];
                self.undo_last();
            }
        }
    }

    /// Split `branch[depth]` under `parity` and keep it iff the graph stays
    /// connected. All shallower branch nodes must already be split.
    pub fn split_and_check(&mut self, depth: usize, parity: Parity) -> bool {
        debug_assert_eq!(depth, self.parities.len());
        let v = self.branch[depth];
        let slots = &self.rotation[v];
        let pairs: Vec<(usize, usize)> = parity
            .pairs(slots.len())
            .map(|(a, b)| (self.resolve(v, slots[a]), self.resolve(v, slots[b])))
            .collect();
        let children = self.graph.split_vertex(v, &pairs);
        self.parities.push(parity);
        self.split_map.insert(v, children);
        if count_nontrivial_components(&self.graph) > 1 {
            debug!(vertex = v, depth, %parity, "split disconnects the graph");
            self.undo_last();
            return false;
        }
        debug!(vertex = v, depth, %parity, "split keeps the graph connected");
        true
    }

    /// Current stand-in for neighbour `target` of `v`: the split-child of
    /// `target` that owns the slot of `v`, or `target` itself if unsplit.
    fn resolve(&self, v: usize, target: usize) -> usize {
        let Some(&d) = self.depth_of.get(&target) else {
            return target;
        };
        let (Some(&parity), Some(children)) = (self.parities.get(d), self.split_map.get(&target))
        else {
            return target;
        };
        let ring = Ring::new(&self.rotation[target]);
        match ring.position(&v) {
            Some(slot) => children[parity.pair_of_slot(slot, ring.len())],
            None => target,
        }
    }

    fn undo_last(&mut self) {
        if self.graph.undo_split() && self.parities.pop().is_some() {
            self.split_map.remove(&self.branch[self.parities.len()]);
        }
    }

    fn unwind(&mut self) {
        while self.graph.pending_splits() > 0 {
            self.undo_last();
        }
    }

    fn charge(&mut self) -> Result<(), AtrailError> {
        self.attempts += 1;
        match self.budget {
            Some(limit) if self.attempts > limit => Err(AtrailError::BudgetExhausted {
                splits: self.attempts - 1,
            }),
            _ => Ok(()),
        }
    }

    pub fn graph(&self) -> &WorkGraph {
        &self.graph
    }

    pub fn split_map(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.split_map
    }

    pub fn parities(&self) -> &[Parity] {
        &self.parities
    }

    /// Split attempts made so far, successful or not.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn into_parts(self) -> (WorkGraph, BTreeMap<usize, Vec<usize>>) {
        (self.graph, self.split_map)
    }
}
