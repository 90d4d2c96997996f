//! Best-known cost per state, stored in an arena.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use smallvec::SmallVec;

use super::graph::Cost;

/// Index of a state in a [`CostTable`]. Stable for the table's lifetime.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<S> {
    state: S,
    cost: Cost,
    estimate: Cost,
    finalized: bool,
    predecessors: SmallVec<[NodeId; 2]>,
}

/// What [`CostTable::relax`] did with a candidate cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// First arrival or strictly cheaper than before; the node must be
    /// (re)offered to the frontier.
    Improved(NodeId),
    /// Same cost as the best known one. With tie tracking on, the
    /// predecessor was recorded as an additional optimal parent.
    Tied(NodeId),
    /// Worse than the best known cost.
    Rejected,
}

/// Map from state to best-known cost from the start, plus the optimal
/// predecessors that produced that cost.
///
/// States live in an arena and are addressed by [`NodeId`], so the frontier
/// and predecessor lists carry plain indices instead of cloned states.
#[derive(Debug, Clone)]
pub struct CostTable<S> {
    index: HashMap<S, NodeId>,
    nodes: Vec<Node<S>>,
}

impl<S: Clone + Eq + Hash> CostTable<S> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Best known cost for `state`, `None` if never reached.
    pub fn best_cost(&self, state: &S) -> Option<Cost> {
        self.index.get(state).map(|&id| self.nodes[id].cost)
    }

    /// Arena id of `state`, if reached.
    pub fn id_of(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// Registers a source state at cost 0 (no predecessor).
    pub fn seed(&mut self, state: S, estimate: Cost) -> Relaxation {
        self.relax(None, state, 0, estimate, false)
    }

    /// Offers `cost` for `state`, reached from `from`.
    ///
    /// A finalized node is never improved; with non-negative edges that can
    /// only be attempted by a broken graph, which trips a debug assertion.
    pub fn relax(
        &mut self,
        from: Option<NodeId>,
        state: S,
        cost: Cost,
        estimate: Cost,
        keep_ties: bool,
    ) -> Relaxation {
        match self.index.entry(state) {
            Entry::Vacant(slot) => {
                let id = self.nodes.len();
                self.nodes.push(Node {
                    state: slot.key().clone(),
                    cost,
                    estimate,
                    finalized: false,
                    predecessors: from.into_iter().collect(),
                });
                slot.insert(id);
                Relaxation::Improved(id)
            }
            Entry::Occupied(slot) => {
                let id = *slot.get();
                let node = &mut self.nodes[id];
                if cost < node.cost {
                    debug_assert!(!node.finalized, "finalized node improved");
                    if node.finalized {
                        return Relaxation::Rejected;
                    }
                    node.cost = cost;
                    node.predecessors.clear();
                    node.predecessors.extend(from);
                    Relaxation::Improved(id)
                } else if cost == node.cost {
                    if keep_ties
                        && let Some(from) = from
                        && !node.predecessors.contains(&from)
                    {
                        node.predecessors.push(from);
                    }
                    Relaxation::Tied(id)
                } else {
                    Relaxation::Rejected
                }
            }
        }
    }

    /// Marks a node as settled: its cost is final from now on.
    pub fn finalize(&mut self, id: NodeId) {
        self.nodes[id].finalized = true;
    }

    pub fn is_finalized(&self, id: NodeId) -> bool {
        self.nodes[id].finalized
    }

    pub fn state(&self, id: NodeId) -> &S {
        &self.nodes[id].state
    }

    pub fn cost(&self, id: NodeId) -> Cost {
        self.nodes[id].cost
    }

    /// Cost plus heuristic estimate, the node's frontier priority.
    pub fn priority(&self, id: NodeId) -> Cost {
        let node = &self.nodes[id];
        node.cost.saturating_add(node.estimate)
    }

    /// Optimal predecessors of a node (empty for sources).
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].predecessors
    }

    /// Number of states ever reached.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every reached state with its best known cost, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, Cost)> + '_ {
        self.nodes.iter().map(|node| (&node.state, node.cost))
    }

    /// Settled states only, in discovery order.
    pub fn finalized(&self) -> impl Iterator<Item = (&S, Cost)> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.finalized)
            .map(|node| (&node.state, node.cost))
    }
}

impl<S: Clone + Eq + Hash> Default for CostTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relax_improves_and_rejects() {
        let mut table = CostTable::new();
        let Relaxation::Improved(a) = table.seed('a', 0) else {
            panic!("seed must insert");
        };
        let Relaxation::Improved(b) = table.relax(Some(a), 'b', 10, 0, false) else {
            panic!("first arrival must improve");
        };
        assert_eq!(table.relax(Some(a), 'b', 12, 0, false), Relaxation::Rejected);
        assert_eq!(table.relax(Some(a), 'b', 7, 0, false), Relaxation::Improved(b));
        assert_eq!(table.best_cost(&'b'), Some(7));
        assert_eq!(table.best_cost(&'z'), None);
        assert_eq!(table.predecessors(b), &[a]);
    }

    #[test]
    fn test_ties_record_extra_predecessors_only_when_asked() {
        let mut table = CostTable::new();
        table.seed('s', 0);
        let s = table.id_of(&'s').unwrap();
        let Relaxation::Improved(x) = table.relax(Some(s), 'x', 1, 0, true) else {
            panic!();
        };
        let Relaxation::Improved(y) = table.relax(Some(s), 'y', 1, 0, true) else {
            panic!();
        };
        let Relaxation::Improved(g) = table.relax(Some(x), 'g', 2, 0, true) else {
            panic!();
        };
        assert_eq!(table.relax(Some(y), 'g', 2, 0, false), Relaxation::Tied(g));
        assert_eq!(table.predecessors(g), &[x]);
        assert_eq!(table.relax(Some(y), 'g', 2, 0, true), Relaxation::Tied(g));
        assert_eq!(table.relax(Some(y), 'g', 2, 0, true), Relaxation::Tied(g));
        assert_eq!(table.predecessors(g), &[x, y]);
    }

    #[test]
    fn test_improvement_resets_predecessors() {
        let mut table = CostTable::new();
        table.seed(0u8, 0);
        table.relax(Some(0), 1, 5, 0, true);
        table.relax(Some(0), 2, 1, 0, true);
        let one = table.id_of(&1).unwrap();
        let two = table.id_of(&2).unwrap();
        table.relax(Some(two), 1, 3, 0, true);
        assert_eq!(table.predecessors(one), &[two]);
        assert_eq!(table.priority(one), 3);
    }
}
