//! Randomized stress tests that drive the heap against a model map and check
//! the structural invariants after every mutation.

use std::collections::HashMap;

use indexed_heap::{HeapError, IndexedHeap, OrdCompare};

const NUM_KEYS: u32 = 64;
const NUM_OPS: usize = 20_000;

/// Checks every invariant observable through the public API:
/// heap property over the storage layout, key/position agreement,
/// and size agreement with the model.
fn check_invariants(heap: &IndexedHeap<u32, i64, OrdCompare<i64>>, model: &HashMap<u32, i64>) {
    assert_eq!(heap.len(), model.len());
    assert_eq!(heap.is_empty(), model.is_empty());

    let entries: Vec<(u32, i64)> = heap.iter().map(|(k, v)| (*k, *v)).collect();

    // No child may outrank its parent (max-heap: child <= parent).
    for i in 1..entries.len() {
        let parent = (i - 1) / 2;
        assert!(
            entries[i].1 <= entries[parent].1,
            "heap property violated at index {}: child {:?} > parent {:?}",
            i,
            entries[i],
            entries[parent]
        );
    }

    // Every stored entry agrees with the model, and every model key is
    // reachable through the position index.
    for (key, value) in &entries {
        assert_eq!(model.get(key), Some(value));
    }
    for (key, value) in model {
        assert!(heap.contains(key));
        assert_eq!(heap.get(key), Some(value));
    }

    // The root must be a maximum of the model.
    if let Some((_, root_value)) = heap.peek() {
        let max_value = model.values().max().unwrap();
        assert_eq!(root_value, max_value);
    }
}

#[test]
fn test_random_ops_against_model() {
    let mut rng = fastrand::Rng::with_seed(0x1D1CE5);
    let mut heap = IndexedHeap::max_heap();
    let mut model: HashMap<u32, i64> = HashMap::new();

    for _ in 0..NUM_OPS {
        let key = rng.u32(0..NUM_KEYS);
        let value = rng.i64(-1_000..1_000);

        match rng.usize(0..6) {
            // push: succeeds exactly when the model doesn't know the key.
            0 | 1 => {
                let result = heap.push(key, value);
                if model.contains_key(&key) {
                    assert_eq!(result, Err(HeapError::DuplicateKey));
                } else {
                    assert_eq!(result, Ok(()));
                    model.insert(key, value);
                }
            }
            // pop: must yield a maximum of the model.
            2 => match heap.pop() {
                Ok((popped_key, popped_value)) => {
                    assert_eq!(model.remove(&popped_key), Some(popped_value));
                    assert!(model.values().all(|&v| v <= popped_value));
                }
                Err(err) => {
                    assert_eq!(err, HeapError::Empty);
                    assert!(model.is_empty());
                }
            },
            // remove: tolerant of absent keys.
            3 => {
                assert_eq!(heap.remove(&key), model.remove(&key));
            }
            // update: strict about absent keys.
            4 => {
                let result = heap.update(&key, value);
                match model.insert(key, value) {
                    Some(old) => assert_eq!(result, Ok(old)),
                    None => {
                        assert_eq!(result, Err(HeapError::KeyNotFound));
                        model.remove(&key);
                    }
                }
            }
            // clear, rarely.
            _ => {
                if rng.u32(0..100) == 0 {
                    heap.clear();
                    model.clear();
                }
            }
        }

        check_invariants(&heap, &model);
    }

    // Drain what's left; the values must come out in non-increasing order.
    let mut drained = Vec::new();
    while let Ok((key, value)) = heap.pop() {
        assert_eq!(model.remove(&key), Some(value));
        drained.push(value);
    }
    assert!(model.is_empty());
    assert!(drained.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_update_heavy_churn() {
    let mut rng = fastrand::Rng::with_seed(0xC0FFEE);
    let mut heap = IndexedHeap::max_heap();
    let mut model: HashMap<u32, i64> = HashMap::new();

    for key in 0..NUM_KEYS {
        let value = rng.i64(0..1_000);
        heap.push(key, value).unwrap();
        model.insert(key, value);
    }

    // Only updates: the membership never changes, but every entry keeps moving.
    for _ in 0..NUM_OPS {
        let key = rng.u32(0..NUM_KEYS);
        let value = rng.i64(0..1_000);

        let old = heap.update(&key, value).unwrap();
        assert_eq!(model.insert(key, value), Some(old));

        check_invariants(&heap, &model);
    }

    assert_eq!(heap.len(), NUM_KEYS as usize);
}
