//! Path reconstruction from recorded predecessors.

use std::collections::HashSet;
use std::hash::Hash;

use fixedbitset::FixedBitSet;

use super::cost_table::{CostTable, NodeId};

/// Read-only view over a finished search's [`CostTable`].
#[derive(Debug, Clone, Copy)]
pub struct PathTrace<'a, S> {
    table: &'a CostTable<S>,
}

impl<'a, S: Clone + Eq + Hash> PathTrace<'a, S> {
    pub fn new(table: &'a CostTable<S>) -> Self {
        Self { table }
    }

    /// One optimal path ending at `goal`, source first.
    ///
    /// Follows the first recorded predecessor, which is always the one that
    /// last improved the node and was settled before it.
    pub fn path_to(&self, goal: NodeId) -> Vec<S> {
        let mut seen = FixedBitSet::with_capacity(self.table.len());
        seen.insert(goal);
        let mut path = vec![self.table.state(goal).clone()];
        let mut current = goal;
        // a source tied through a zero-cost cycle gains a predecessor
        while let Some(&previous) = self.table.predecessors(current).first() {
            if seen.put(previous) {
                break;
            }
            path.push(self.table.state(previous).clone());
            current = previous;
        }
        path.reverse();
        path
    }

    /// Every node reachable backwards from `goals` over predecessor links,
    /// goals and sources included, in ascending id order.
    pub fn optimal_nodes(&self, goals: &[NodeId]) -> Vec<NodeId> {
        let mut seen = FixedBitSet::with_capacity(self.table.len());
        let mut stack = goals.to_vec();
        let mut nodes = Vec::new();

        while let Some(id) = stack.pop() {
            if seen.put(id) {
                continue;
            }
            nodes.push(id);
            stack.extend(
                self.table
                    .predecessors(id)
                    .iter()
                    .filter(|&&p| !seen.contains(p)),
            );
        }

        nodes.sort_unstable();
        nodes
    }

    /// States of [`optimal_nodes`](Self::optimal_nodes).
    pub fn optimal_states(&self, goals: &[NodeId]) -> HashSet<S> {
        self.project(goals, S::clone)
    }

    /// Maps every optimal node's state through `f` and collects the distinct
    /// results, e.g. to count grid tiles regardless of facing.
    pub fn project<T, P>(&self, goals: &[NodeId], f: P) -> HashSet<T>
    where
        T: Eq + Hash,
        P: Fn(&S) -> T,
    {
        self.optimal_nodes(goals)
            .into_iter()
            .map(|id| f(self.table.state(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::search::Relaxation;

    fn diamond() -> (CostTable<char>, NodeId) {
        // s -> a -> g and s -> b -> g, both of cost 2; s -> c dead end
        let mut table = CostTable::new();
        table.seed('s', 0);
        let s = table.id_of(&'s').unwrap();
        table.relax(Some(s), 'a', 1, 0, true);
        table.relax(Some(s), 'b', 1, 0, true);
        table.relax(Some(s), 'c', 1, 0, true);
        let a = table.id_of(&'a').unwrap();
        let b = table.id_of(&'b').unwrap();
        let Relaxation::Improved(g) = table.relax(Some(a), 'g', 2, 0, true) else {
            panic!("goal must be new");
        };
        table.relax(Some(b), 'g', 2, 0, true);
        (table, g)
    }

    #[test]
    fn test_path_to_follows_first_predecessor() {
        let (table, g) = diamond();
        let trace = PathTrace::new(&table);
        assert_eq!(trace.path_to(g), vec!['s', 'a', 'g']);
        assert_eq!(trace.path_to(0), vec!['s']);
    }

    #[test]
    fn test_optimal_states_is_union_of_tied_paths() {
        let (table, g) = diamond();
        let trace = PathTrace::new(&table);
        let states = trace.optimal_states(&[g]);
        assert_eq!(states, HashSet::from(['s', 'a', 'b', 'g']));
        assert_eq!(trace.optimal_nodes(&[g]).len(), 4);
    }

    #[test]
    fn test_project_collapses_states() {
        let (table, g) = diamond();
        let trace = PathTrace::new(&table);
        let vowels = trace.project(&[g], |c| "aeiou".contains(*c));
        assert_eq!(vowels, HashSet::from([true, false]));
    }
}
