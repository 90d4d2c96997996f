//! Frontier (open set) implementations.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use super::graph::Cost;

/// Cost-ordered collection of entries awaiting expansion.
///
/// Duplicates are allowed: the driver discards stale entries when they are
/// popped, so no decrease-key is needed. Ties between equal costs pop in an
/// unspecified order.
pub trait Frontier<T> {
    /// Inserts an entry with the given priority.
    fn offer(&mut self, cost: Cost, item: T);

    /// Removes and returns an entry with the smallest priority held.
    fn pop_min(&mut self) -> Option<(Cost, T)>;

    /// Number of entries held, stale ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    fn clear(&mut self);
}

/// Heap entry ordered by cost only, so items need no `Ord`.
#[derive(Debug, Clone, Copy)]
struct CostOrdered<T> {
    cost: Cost,
    item: T,
}

impl<T> PartialEq for CostOrdered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<T> Eq for CostOrdered<T> {}

impl<T> PartialOrd for CostOrdered<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CostOrdered<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost)
    }
}

/// Binary-heap frontier. Works for any cost distribution.
#[derive(Debug)]
pub struct HeapFrontier<T> {
    heap: BinaryHeap<Reverse<CostOrdered<T>>>,
}

impl<T> HeapFrontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }
}

impl<T> Default for HeapFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for HeapFrontier<T> {
    fn offer(&mut self, cost: Cost, item: T) {
        self.heap.push(Reverse(CostOrdered { cost, item }));
    }

    fn pop_min(&mut self) -> Option<(Cost, T)> {
        self.heap.pop().map(|Reverse(e)| (e.cost, e.item))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}

/// Bucket queue indexed by cost.
///
/// Suited to small integer costs: push and pop are O(1) amortised, and memory
/// grows with the largest cost offered. Entries offered below the current
/// scan position are clamped to it, which cannot happen while the driver's
/// pops are monotone.
#[derive(Debug)]
pub struct BucketFrontier<T> {
    buckets: Vec<Vec<T>>,
    cursor: usize,
    len: usize,
}

impl<T> BucketFrontier<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            cursor: 0,
            len: 0,
        }
    }
}

impl<T> Default for BucketFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for BucketFrontier<T> {
    fn offer(&mut self, cost: Cost, item: T) {
        let index = (cost as usize).max(self.cursor);
        if index >= self.buckets.len() {
            self.buckets.resize_with(index + 1, Vec::new);
        }
        self.buckets[index].push(item);
        self.len += 1;
    }

    fn pop_min(&mut self) -> Option<(Cost, T)> {
        if self.len == 0 {
            return None;
        }
        while self.cursor < self.buckets.len() {
            if let Some(item) = self.buckets[self.cursor].pop() {
                self.len -= 1;
                return Some((self.cursor as Cost, item));
            }
            self.cursor += 1;
        }
        None
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.cursor = 0;
        self.len = 0;
    }
}

/// 0-1 BFS frontier: two plain FIFO queues, one for the current cost level
/// and one for the next.
///
/// Only valid when every step cost is 0 or 1 (and no heuristic is used), so
/// that every offered priority is either the level being popped or the one
/// after it.
#[derive(Debug)]
pub struct ZeroOneFrontier<T> {
    current: VecDeque<T>,
    next: VecDeque<T>,
    level: Cost,
}

impl<T> ZeroOneFrontier<T> {
    pub fn new() -> Self {
        Self {
            current: VecDeque::new(),
            next: VecDeque::new(),
            level: 0,
        }
    }
}

impl<T> Default for ZeroOneFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for ZeroOneFrontier<T> {
    fn offer(&mut self, cost: Cost, item: T) {
        if self.current.is_empty() && self.next.is_empty() && cost > self.level + 1 {
            self.level = cost;
        }
        debug_assert!(
            cost >= self.level && cost <= self.level + 1,
            "0-1 frontier offered cost {cost} at level {}",
            self.level
        );
        if cost <= self.level {
            self.current.push_back(item);
        } else {
            self.next.push_back(item);
        }
    }

    fn pop_min(&mut self) -> Option<(Cost, T)> {
        if self.current.is_empty() {
            if self.next.is_empty() {
                return None;
            }
            std::mem::swap(&mut self.current, &mut self.next);
            self.level += 1;
        }
        self.current.pop_front().map(|item| (self.level, item))
    }

    fn len(&self) -> usize {
        self.current.len() + self.next.len()
    }

    fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
        self.level = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<char>>(mut frontier: F) -> Vec<Cost> {
        let mut costs = Vec::new();
        while let Some((cost, _)) = frontier.pop_min() {
            costs.push(cost);
        }
        costs
    }

    #[test]
    fn test_heap_pops_in_cost_order() {
        let mut frontier = HeapFrontier::new();
        for (cost, item) in [(5, 'a'), (1, 'b'), (3, 'c'), (1, 'd')] {
            frontier.offer(cost, item);
        }
        assert_eq!(frontier.len(), 4);
        assert_eq!(drain(frontier), vec![1, 1, 3, 5]);
    }

    #[test]
    fn test_bucket_pops_in_cost_order() {
        let mut frontier = BucketFrontier::new();
        for (cost, item) in [(5, 'a'), (1, 'b'), (3, 'c'), (1, 'd')] {
            frontier.offer(cost, item);
        }
        assert_eq!(frontier.pop_min().map(|(c, _)| c), Some(1));
        // offers after a pop may land on the current bucket again
        frontier.offer(1, 'e');
        assert_eq!(drain(frontier), vec![1, 1, 3, 5]);
    }

    #[test]
    fn test_zero_one_levels() {
        let mut frontier = ZeroOneFrontier::new();
        frontier.offer(0, 'a');
        assert_eq!(frontier.pop_min(), Some((0, 'a')));
        frontier.offer(1, 'b');
        frontier.offer(0, 'c');
        assert_eq!(frontier.pop_min(), Some((0, 'c')));
        frontier.offer(1, 'd');
        assert_eq!(frontier.pop_min(), Some((1, 'b')));
        frontier.offer(2, 'e');
        frontier.offer(1, 'f');
        assert_eq!(frontier.pop_min(), Some((1, 'd')));
        assert_eq!(frontier.pop_min(), Some((1, 'f')));
        assert_eq!(frontier.pop_min(), Some((2, 'e')));
        assert_eq!(frontier.pop_min(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_clear_empties() {
        let mut frontier = BucketFrontier::new();
        frontier.offer(4, 'x');
        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_min(), None);
    }
}
