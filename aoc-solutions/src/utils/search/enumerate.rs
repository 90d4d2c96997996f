//! Exhaustive simple-path enumeration over small compressed graphs.
//!
//! Longest simple path is NP-hard, so this is only for graphs with a few
//! dozen nodes, such as maze junctions after corridor compression.

use fixedbitset::FixedBitSet;

use super::graph::Cost;

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    edge: usize,
    cost: Cost,
}

/// Weighted directed graph over dense `usize` node ids, searched depth-first.
#[derive(Debug, Clone, Default)]
pub struct PathEnumerator {
    edges: Vec<Vec<(usize, Cost)>>,
    max_depth: Option<usize>,
}

impl PathEnumerator {
    pub fn new(nodes: usize) -> Self {
        Self {
            edges: vec![Vec::new(); nodes],
            max_depth: None,
        }
    }

    /// Limits paths to at most `depth` edges.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Adds a directed edge, growing the node set if needed.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: Cost) {
        let needed = from.max(to) + 1;
        if needed > self.edges.len() {
            self.edges.resize_with(needed, Vec::new);
        }
        self.edges[from].push((to, cost));
    }

    pub fn add_undirected_edge(&mut self, a: usize, b: usize, cost: Cost) {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost);
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self, node: usize) -> &[(usize, Cost)] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    /// Maximum total cost over all simple paths from `start` to `goal`,
    /// `None` if no such path exists within the depth limit.
    pub fn longest_simple_path(&self, start: usize, goal: usize) -> Option<Cost> {
        if start >= self.edges.len() || goal >= self.edges.len() {
            return None;
        }
        let depth_limit = self.max_depth.unwrap_or(usize::MAX);

        let mut visited = FixedBitSet::with_capacity(self.edges.len());
        visited.insert(start);
        let mut stack = vec![Frame {
            node: start,
            edge: 0,
            cost: 0,
        }];
        let mut best: Option<Cost> = None;

        loop {
            let depth = stack.len();
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let Frame { node, edge, cost } = *frame;

            if node == goal {
                best = Some(best.map_or(cost, |b| b.max(cost)));
                visited.set(node, false);
                stack.pop();
                continue;
            }

            let edges = &self.edges[node];
            if edge < edges.len() && depth <= depth_limit {
                frame.edge += 1;
                let (next, weight) = edges[edge];
                if !visited.contains(next) {
                    visited.insert(next);
                    stack.push(Frame {
                        node: next,
                        edge: 0,
                        cost: cost + weight,
                    });
                }
            } else {
                visited.set(node, false);
                stack.pop();
            }
        }

        best
    }
}
