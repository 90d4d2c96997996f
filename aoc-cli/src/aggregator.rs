//! Result aggregator for ordering parallel solver results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected keys (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Wrapper for min-heap ordering of SolverResult
struct OrderedResult(SolverResult);

impl Ord for OrderedResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse ordering for min-heap (smallest first)
        ResultKey::from(&other.0).cmp(&ResultKey::from(&self.0))
    }
}

impl PartialOrd for OrderedResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for OrderedResult {}

impl PartialEq for OrderedResult {
    fn eq(&self, other: &Self) -> bool {
        ResultKey::from(&self.0) == ResultKey::from(&other.0)
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Min-heap of expected keys (next to output is at top)
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Min-heap of received results waiting to be output
    pending: BinaryHeap<OrderedResult>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(OrderedResult(result));

        // Emit results while pending min matches expected min
        let mut ready = Vec::new();
        while let Some(Reverse(next_expected)) = self.expected.peek() {
            match self.pending.peek() {
                Some(top) if ResultKey::from(&top.0) == *next_expected => {}
                _ => break,
            }
            self.expected.pop();
            if let Some(OrderedResult(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|o| o.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: (part == 1).then(|| TimeDelta::milliseconds(5)),
        }
    }

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(vec![key(2022, 12, 1), key(2022, 12, 2)]);

        let ready = agg.add(make_result(2022, 12, 1));
        assert_eq!(keys_of(&ready), vec![key(2022, 12, 1)]);

        let ready = agg.add(make_result(2022, 12, 2));
        assert_eq!(keys_of(&ready), vec![key(2022, 12, 2)]);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg = ResultAggregator::new(vec![
            key(2023, 16, 1),
            key(2023, 16, 2),
            key(2023, 17, 1),
        ]);

        // Part 2 and the next day arrive before 2023/16 part 1
        assert!(agg.add(make_result(2023, 16, 2)).is_empty());
        assert!(agg.add(make_result(2023, 17, 1)).is_empty());

        let ready = agg.add(make_result(2023, 16, 1));
        assert_eq!(
            keys_of(&ready),
            vec![key(2023, 16, 1), key(2023, 16, 2), key(2023, 17, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(vec![key(2024, 18, 1), key(2024, 18, 2)]);

        // Part 1 never arrives (its input failed to load)
        agg.add(make_result(2024, 18, 2));

        let remaining = agg.drain();
        assert_eq!(keys_of(&remaining), vec![key(2024, 18, 2)]);
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_emits_sorted(
            order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let expected: Vec<ResultKey> = (0..12u8)
                .map(|i| key(2022 + u16::from(i / 4), i % 4 / 2 + 1, i % 2 + 1))
                .collect();
            let mut agg = ResultAggregator::new(expected.clone());

            let mut emitted = Vec::new();
            for i in order {
                let k = expected[i];
                emitted.extend(agg.add(make_result(k.year, k.day, k.part)));
            }

            prop_assert!(agg.is_complete());
            prop_assert_eq!(keys_of(&emitted), expected);
        }
    }
}
