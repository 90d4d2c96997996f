//! Weighted Shortest-Path Search over Implicit State Graphs
//!
//! One driver covers the grid and maze puzzles that boil down to "cheapest
//! way from here to there": plain Dijkstra, 0-1 BFS, bucket-queue Dijkstra,
//! A*, multi-source starts, and "all optimal paths" tile counting.
//!
//! # Pieces
//!
//! - [`StateGraph`]: the puzzle supplies states, successors, a goal test and
//!   an optional heuristic. [`ClosureGraph`] adapts two closures.
//! - [`Frontier`]: the open set. Pick by cost distribution:
//!   - [`HeapFrontier`]: any non-negative costs (the default)
//!   - [`BucketFrontier`]: small integer costs
//!   - [`ZeroOneFrontier`]: step costs of 0 or 1 only, no heuristic
//! - [`CostTable`]: best cost and optimal predecessors per state, in an arena
//!   addressed by [`NodeId`].
//! - [`Search`]: the control loop. Lazy deletion, no decrease-key.
//! - [`PathTrace`]: one optimal path, or the union of all of them.
//! - [`PathEnumerator`]: brute-force longest simple path for tiny graphs.
//!
//! # Warning: Zero-Cost Cycles
//!
//! Zero-cost edges are fine, but a cycle of zero-cost edges together with
//! [`SearchMode::AllOptimal`] makes predecessor links cyclic. Reconstruction
//! still terminates, but the "optimal" set then includes the whole cycle.
//!
//! # Example: Multi-Source Grid Search
//!
//! ```rust
//! use aoc_solutions::utils::search::{ClosureGraph, Search};
//!
//! let walls = ["..#", "..#", "..."];
//! let open = |r: i32, c: i32| {
//!     (0..3).contains(&r) && (0..3).contains(&c) && walls[r as usize].as_bytes()[c as usize] == b'.'
//! };
//! let graph = ClosureGraph::new(
//!     move |&(r, c): &(i32, i32), out: &mut Vec<((i32, i32), u64)>| {
//!         for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
//!             if open(r + dr, c + dc) {
//!                 out.push(((r + dr, c + dc), 1));
//!             }
//!         }
//!     },
//!     |&pos: &(i32, i32)| pos == (0, 1),
//! );
//!
//! let mut search = Search::new(graph);
//! search.start_all([(2, 2), (2, 0)]);
//! assert_eq!(search.run().cost(), Some(3));
//! ```

mod cost_table;
mod driver;
mod enumerate;
mod frontier;
mod graph;
mod path;

pub use cost_table::{CostTable, NodeId, Relaxation};
pub use driver::{
    Search, SearchMode, SearchOutcome, SearchStats, SearchStatus, Step, optimal_path_states,
    shortest_path_cost,
};
pub use enumerate::PathEnumerator;
pub use frontier::{BucketFrontier, Frontier, HeapFrontier, ZeroOneFrontier};
pub use graph::{ClosureGraph, Cost, StateGraph};
pub use path::PathTrace;
