//! Property-based tests using proptest.
//!
//! These tests drive the public API with generated inputs and compare the
//! heap's observable behaviour against flat models.

use std::collections::HashMap;

use fibqueue::{FibonacciHeap, HeapError};
use proptest::prelude::*;

type MinHeap<V> = FibonacciHeap<V, i64, fn(&i64, &i64) -> bool>;

fn min_heap<V: Eq + std::hash::Hash + Clone + std::fmt::Debug>() -> MinHeap<V> {
    FibonacciHeap::new(|a, b| a < b, i64::MIN)
}

proptest! {
    /// Draining a heap yields priorities in non-ascending order of rank
    /// (non-descending numeric order for a min-heap), whatever the push
    /// order was.
    #[test]
    fn drains_in_priority_order(priorities in proptest::collection::vec(-1000i64..1000, 1..200)) {
        let mut heap = min_heap();
        for (v, &p) in priorities.iter().enumerate() {
            heap.push(v, p).unwrap();
        }
        let mut last = i64::MIN;
        let mut drained = 0;
        while let Ok(v) = heap.pop() {
            let p = priorities[v];
            prop_assert!(p >= last, "pop order regressed: {} after {}", p, last);
            last = p;
            drained += 1;
        }
        prop_assert_eq!(drained, priorities.len());
    }

    /// Peek always agrees with a flat model of the live entries.
    #[test]
    fn peek_matches_a_flat_model(
        ops in proptest::collection::vec((any::<bool>(), 0i64..500), 1..150)
    ) {
        let mut heap = min_heap();
        let mut model: HashMap<i64, i64> = HashMap::new();
        let mut serial = 0i64;
        for (pop, priority) in ops {
            if pop && !model.is_empty() {
                let v = heap.pop().unwrap();
                let p = model.remove(&v).expect("popped a value the model lost");
                prop_assert!(model.values().all(|&q| q >= p));
            } else {
                heap.push(serial, priority).unwrap();
                model.insert(serial, priority);
                serial += 1;
            }
            prop_assert_eq!(heap.len(), model.len());
            match heap.peek() {
                Ok((_, &p)) => {
                    let best = model.values().min().copied().unwrap();
                    prop_assert_eq!(p, best);
                }
                Err(e) => {
                    prop_assert_eq!(e, HeapError::EmptyHeap);
                    prop_assert!(model.is_empty());
                }
            }
        }
    }

    /// Melding two disjoint heaps drains the union in order.
    #[test]
    fn meld_drains_the_union(
        left in proptest::collection::vec(-500i64..500, 0..100),
        right in proptest::collection::vec(-500i64..500, 0..100)
    ) {
        let mut a = min_heap();
        let mut b = min_heap();
        for (v, &p) in left.iter().enumerate() {
            a.push(v, p).unwrap();
        }
        for (v, &p) in right.iter().enumerate() {
            b.push(v + left.len(), p).unwrap();
        }
        a.meld(&mut b).unwrap();
        prop_assert!(b.is_empty());
        prop_assert_eq!(a.len(), left.len() + right.len());

        let mut expected: Vec<i64> = left.iter().chain(right.iter()).copied().collect();
        expected.sort_unstable();
        let mut all: Vec<i64> = Vec::with_capacity(expected.len());
        while let Ok(v) = a.pop() {
            let p = if v < left.len() { left[v] } else { right[v - left.len()] };
            all.push(p);
        }
        prop_assert_eq!(all, expected);
    }

    /// Increase-priority either improves the entry or fails, and the drain
    /// order always reflects the final priorities.
    #[test]
    fn increase_priority_tracks_a_flat_model(
        initial in proptest::collection::vec(0i64..1000, 1..80),
        raises in proptest::collection::vec((any::<prop::sample::Index>(), -1000i64..1000), 0..40)
    ) {
        let mut heap = min_heap();
        let mut model: Vec<i64> = initial.clone();
        for (v, &p) in initial.iter().enumerate() {
            heap.push(v, p).unwrap();
        }
        for (idx, p) in raises {
            let v = idx.index(model.len());
            let raised = heap.increase_priority(&v, p);
            if model[v] >= p {
                prop_assert!(raised.is_ok());
                model[v] = p;
            } else {
                prop_assert!(raised.is_err());
            }
        }
        let mut last = i64::MIN;
        while let Ok(v) = heap.pop() {
            prop_assert!(model[v] >= last);
            last = model[v];
        }
    }
}
