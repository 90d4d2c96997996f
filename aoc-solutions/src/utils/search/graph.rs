//! Trait-based state graph definition.

use std::hash::Hash;
use std::marker::PhantomData;

/// Step and path cost. Unsigned, so a negative edge cannot be expressed.
pub type Cost = u64;

/// The puzzle-specific side of a search: what a state is, where it can go,
/// and when it is done.
///
/// A state must capture everything that affects future moves and costs
/// (position, facing, run length, time phase, visited waypoints, ...). Two
/// situations that can diverge later must never compare equal.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::search::{Cost, Search, SearchOutcome, StateGraph};
///
/// /// Walk a number line from 0 to 10 with steps of +1 (cost 1) or +3 (cost 2).
/// struct Line;
///
/// impl StateGraph for Line {
///     type State = u32;
///
///     fn neighbors(&self, n: &u32, out: &mut Vec<(u32, Cost)>) {
///         if *n < 10 {
///             out.push((n + 1, 1));
///         }
///         if *n + 3 <= 10 {
///             out.push((n + 3, 2));
///         }
///     }
///
///     fn is_goal(&self, n: &u32) -> bool {
///         *n == 10
///     }
/// }
///
/// let mut search = Search::new(Line);
/// search.start(0);
/// assert_eq!(search.run(), SearchOutcome::Reached { cost: 7 });
/// ```
pub trait StateGraph {
    /// Opaque, immutable search state.
    type State: Clone + Eq + Hash;

    /// Appends every legal `(next_state, step_cost)` transition from `state`.
    ///
    /// The caller clears `out` before each call. Blocked or out-of-range
    /// successors are simply not pushed. Every transition must change the
    /// state.
    fn neighbors(&self, state: &Self::State, out: &mut Vec<(Self::State, Cost)>);

    /// Whether `state` satisfies the search goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Optional lower bound on the remaining cost to a goal.
    ///
    /// Must be consistent (never drops by more than the step cost along an
    /// edge), otherwise the first goal popped may not be optimal. The default
    /// of zero turns the search into plain Dijkstra.
    fn heuristic(&self, _state: &Self::State) -> Cost {
        0
    }
}

impl<G: StateGraph + ?Sized> StateGraph for &G {
    type State = G::State;

    fn neighbors(&self, state: &Self::State, out: &mut Vec<(Self::State, Cost)>) {
        (**self).neighbors(state, out)
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn heuristic(&self, state: &Self::State) -> Cost {
        (**self).heuristic(state)
    }
}

/// Wrapper to adapt closures to the [`StateGraph`] trait.
///
/// ```rust
/// use aoc_solutions::utils::search::{ClosureGraph, Search};
///
/// let graph = ClosureGraph::new(
///     |n: &i32, out: &mut Vec<(i32, u64)>| {
///         out.push((n + 1, 1));
///         out.push((n * 2, 1));
///     },
///     |n: &i32| *n == 12,
/// );
///
/// let mut search = Search::new(graph);
/// search.start(1);
/// // 1 -> 2 -> 3 -> 6 -> 12
/// assert_eq!(search.run().cost(), Some(4));
/// ```
pub struct ClosureGraph<S, N, G>
where
    N: Fn(&S, &mut Vec<(S, Cost)>),
    G: Fn(&S) -> bool,
{
    neighbor_fn: N,
    goal_fn: G,
    _phantom: PhantomData<fn(&S)>,
}

impl<S, N, G> ClosureGraph<S, N, G>
where
    N: Fn(&S, &mut Vec<(S, Cost)>),
    G: Fn(&S) -> bool,
{
    /// Creates a graph from a neighbour function and a goal predicate.
    pub fn new(neighbor_fn: N, goal_fn: G) -> Self {
        Self {
            neighbor_fn,
            goal_fn,
            _phantom: PhantomData,
        }
    }
}

impl<S, N, G> StateGraph for ClosureGraph<S, N, G>
where
    S: Clone + Eq + Hash,
    N: Fn(&S, &mut Vec<(S, Cost)>),
    G: Fn(&S) -> bool,
{
    type State = S;

    fn neighbors(&self, state: &S, out: &mut Vec<(S, Cost)>) {
        (self.neighbor_fn)(state, out)
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.goal_fn)(state)
    }
}
