//! Generalised Dijkstra / 0-1 BFS / A* control loop.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::cost_table::{CostTable, NodeId, Relaxation};
use super::frontier::{Frontier, HeapFrontier};
use super::graph::{Cost, StateGraph};
use super::path::PathTrace;

/// How far the driver keeps going once a goal is popped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Stop at the first goal popped; its cost is optimal.
    #[default]
    FirstOptimal,
    /// Keep popping until the frontier rises above the best goal cost,
    /// recording every equal-cost goal and every equal-cost predecessor.
    AllOptimal,
}

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Initialized,
    Running,
    GoalFound,
    Exhausted,
}

/// Result of a finished search. An unreachable goal is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Reached { cost: Cost },
    Unreachable,
}

impl SearchOutcome {
    /// Minimal cost, `None` when unreachable.
    pub fn cost(self) -> Option<Cost> {
        match self {
            SearchOutcome::Reached { cost } => Some(cost),
            SearchOutcome::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, SearchOutcome::Reached { .. })
    }
}

/// What a single [`Search::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A node was settled and its successors relaxed.
    Expanded(NodeId),
    /// A goal node was settled.
    Goal(NodeId),
    /// A stale frontier entry was discarded.
    Stale,
    /// The search is over.
    Done(SearchOutcome),
}

/// Counters for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub popped: usize,
    pub stale: usize,
    pub expanded: usize,
}

/// One search over a [`StateGraph`], owning its cost table and frontier.
///
/// Construct, seed with [`start`](Search::start), then [`run`](Search::run)
/// (or drive it manually with [`step`](Search::step)). The table stays
/// available afterwards for cost lookups and path reconstruction.
///
/// ```rust
/// use aoc_solutions::utils::search::{ClosureGraph, Search, SearchMode, ZeroOneFrontier};
///
/// // A 1x4 corridor: 0 - 1 - 2 - 3, unit steps
/// let graph = ClosureGraph::new(
///     |n: &u8, out: &mut Vec<(u8, u64)>| {
///         if *n > 0 { out.push((n - 1, 1)); }
///         if *n < 3 { out.push((n + 1, 1)); }
///     },
///     |n: &u8| *n == 3,
/// );
///
/// let mut search = Search::with_frontier(graph, ZeroOneFrontier::new()).mode(SearchMode::AllOptimal);
/// search.start(0);
/// assert_eq!(search.run().cost(), Some(3));
/// assert_eq!(search.trace().path_to(search.goals()[0]), vec![0, 1, 2, 3]);
/// ```
pub struct Search<G: StateGraph, F = HeapFrontier<NodeId>> {
    graph: G,
    frontier: F,
    table: CostTable<G::State>,
    mode: SearchMode,
    max_cost: Option<Cost>,
    status: SearchStatus,
    goals: Vec<NodeId>,
    best_goal: Option<Cost>,
    buffer: Vec<(G::State, Cost)>,
    stats: SearchStats,
}

impl<G: StateGraph> Search<G> {
    /// Creates a search with the binary-heap frontier.
    pub fn new(graph: G) -> Self {
        Self::with_frontier(graph, HeapFrontier::new())
    }
}

impl<G, F> Search<G, F>
where
    G: StateGraph,
    F: Frontier<NodeId>,
{
    /// Creates a search with a specific frontier implementation.
    ///
    /// # Arguments
    ///
    /// - `graph`: The puzzle topology
    /// - `frontier`: An empty frontier; see the module docs for when
    ///   the bucket and 0-1 variants apply
    pub fn with_frontier(graph: G, frontier: F) -> Self {
        Self {
            graph,
            frontier,
            table: CostTable::new(),
            mode: SearchMode::FirstOptimal,
            max_cost: None,
            status: SearchStatus::Initialized,
            goals: Vec::new(),
            best_goal: None,
            buffer: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Successors whose total cost would exceed `max_cost` are not relaxed.
    pub fn max_cost(mut self, max_cost: Cost) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Seeds a source state at cost 0.
    ///
    /// Returns whether the state was queued. Seeding is only possible before
    /// the first [`step`](Search::step): a cost-0 source arriving after
    /// nodes were settled would undercut costs that are already final, so
    /// later seeds are ignored. Seeding the same state twice is a no-op.
    pub fn start(&mut self, state: G::State) -> bool {
        if self.status != SearchStatus::Initialized {
            return false;
        }
        let estimate = self.graph.heuristic(&state);
        match self.table.seed(state, estimate) {
            Relaxation::Improved(id) => {
                self.frontier.offer(estimate, id);
                true
            }
            Relaxation::Tied(_) | Relaxation::Rejected => false,
        }
    }

    /// Seeds several source states at cost 0 (multi-source search).
    /// Returns how many were queued.
    pub fn start_all<I>(&mut self, states: I) -> usize
    where
        I: IntoIterator<Item = G::State>,
    {
        states
            .into_iter()
            .map(|state| self.start(state))
            .filter(|&queued| queued)
            .count()
    }

    /// Runs until a goal is settled (or, in [`SearchMode::AllOptimal`], until
    /// no more equal-cost goals can appear) or the frontier empties.
    pub fn run(&mut self) -> SearchOutcome {
        loop {
            if let Step::Done(outcome) = self.step() {
                return outcome;
            }
        }
    }

    /// Pops one frontier entry and processes it.
    pub fn step(&mut self) -> Step {
        match self.status {
            SearchStatus::GoalFound | SearchStatus::Exhausted => {
                return Step::Done(self.outcome());
            }
            SearchStatus::Initialized => self.status = SearchStatus::Running,
            SearchStatus::Running => {}
        }

        let Some((priority, id)) = self.frontier.pop_min() else {
            return self.finish();
        };
        self.stats.popped += 1;

        // Pops are monotone, so nothing left can tie the best goal.
        if self.best_goal.is_some_and(|best| priority > best) {
            return self.finish();
        }

        if self.table.is_finalized(id) || priority > self.table.priority(id) {
            self.stats.stale += 1;
            return Step::Stale;
        }

        self.table.finalize(id);
        let cost = self.table.cost(id);

        if self.graph.is_goal(self.table.state(id)) {
            trace!(node = id, cost, "goal settled");
            self.goals.push(id);
            if self.best_goal.is_none() {
                self.best_goal = Some(cost);
            }
            if self.mode == SearchMode::FirstOptimal {
                self.status = SearchStatus::GoalFound;
                self.log_summary();
            }
            return Step::Goal(id);
        }

        self.expand(id, cost);
        Step::Expanded(id)
    }

    fn expand(&mut self, id: NodeId, cost: Cost) {
        let keep_ties = self.mode == SearchMode::AllOptimal;
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        self.graph.neighbors(self.table.state(id), &mut buffer);

        for (next, step_cost) in buffer.drain(..) {
            let candidate = cost.saturating_add(step_cost);
            if self.max_cost.is_some_and(|max| candidate > max) {
                continue;
            }
            let estimate = self.graph.heuristic(&next);
            if let Relaxation::Improved(next_id) =
                self.table
                    .relax(Some(id), next, candidate, estimate, keep_ties)
            {
                self.frontier
                    .offer(candidate.saturating_add(estimate), next_id);
            }
        }

        self.buffer = buffer;
        self.stats.expanded += 1;
    }

    fn finish(&mut self) -> Step {
        self.status = if self.goals.is_empty() {
            SearchStatus::Exhausted
        } else {
            SearchStatus::GoalFound
        };
        self.log_summary();
        Step::Done(self.outcome())
    }

    fn log_summary(&self) {
        debug!(
            status = ?self.status,
            best = ?self.best_goal,
            goals = self.goals.len(),
            states = self.table.len(),
            popped = self.stats.popped,
            stale = self.stats.stale,
            expanded = self.stats.expanded,
            "search finished"
        );
    }

    /// Outcome so far: the best goal cost found, or unreachable.
    pub fn outcome(&self) -> SearchOutcome {
        match self.best_goal {
            Some(cost) => SearchOutcome::Reached { cost },
            None => SearchOutcome::Unreachable,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn table(&self) -> &CostTable<G::State> {
        &self.table
    }

    /// Goal nodes settled at the best goal cost.
    pub fn goals(&self) -> &[NodeId] {
        &self.goals
    }

    /// Best known cost for `state`.
    pub fn best_cost(&self, state: &G::State) -> Option<Cost> {
        self.table.best_cost(state)
    }

    /// Backward walks over the recorded predecessors.
    pub fn trace(&self) -> PathTrace<'_, G::State> {
        PathTrace::new(&self.table)
    }

    /// One optimal path from a source to the first goal found.
    pub fn best_path(&self) -> Option<Vec<G::State>> {
        self.goals.first().map(|&goal| self.trace().path_to(goal))
    }

    /// Every state on some optimal source-to-goal path.
    ///
    /// Complete only in [`SearchMode::AllOptimal`]; in first-optimal mode
    /// this is the single recorded path.
    pub fn optimal_states(&self) -> HashSet<G::State> {
        self.trace().optimal_states(&self.goals)
    }
}

/// Minimal cost from `start` to any goal of `graph`.
pub fn shortest_path_cost<G: StateGraph>(graph: G, start: G::State) -> SearchOutcome {
    let mut search = Search::new(graph);
    search.start(start);
    search.run()
}

/// Minimal cost plus every state lying on any optimal path.
pub fn optimal_path_states<G: StateGraph>(
    graph: G,
    start: G::State,
) -> (SearchOutcome, HashSet<G::State>) {
    let mut search = Search::new(graph).mode(SearchMode::AllOptimal);
    search.start(start);
    let outcome = search.run();
    (outcome, search.optimal_states())
}
