//! Stress tests that push the heap through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_dary_heap::{DHeap, HeapOrder};

/// Test massive numbers of inserts and extractions
fn test_massive_operations(d: usize) {
    let mut heap = DHeap::new(d, HeapOrder::Min).unwrap();

    for i in 0..5000 {
        heap.insert(i, i);
    }
    assert_eq!(heap.len(), 5000);

    for i in 0..5000 {
        assert_eq!(heap.extract_top_entry(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test alternating insert and extract
fn test_alternating_ops(d: usize) {
    let mut heap = DHeap::new(d, HeapOrder::Max).unwrap();

    for i in 0..500 {
        heap.insert(i * 2, i * 2);
        heap.insert(i * 2 + 1, i * 2 + 1);
        assert_eq!(heap.extract_top(), Ok(i * 2 + 1));
    }

    assert_eq!(heap.len(), 500);
    assert!(heap.validate());
}

/// Relax-style workload: everything seeded at the worst priority, then lowered in random order
fn test_relax_workload(d: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = 800;
    let mut heap = DHeap::from_parts(d, HeapOrder::Min, (0..n).collect(), vec![u64::MAX; n]).unwrap();
    let mut best = vec![u64::MAX; n];

    for _ in 0..4000 {
        let element = rng.gen_range(0..n);
        let candidate = rng.gen_range(0..1_000_000);
        if candidate < best[element] {
            best[element] = candidate;
            heap.update(&element, candidate).unwrap();
        }
    }
    assert!(heap.validate());

    let mut expected: Vec<u64> = best.clone();
    expected.sort();
    let mut extracted = Vec::with_capacity(n);
    while let Ok((element, priority)) = heap.extract_top_entry() {
        assert_eq!(priority, best[element]);
        extracted.push(priority);
    }
    assert_eq!(extracted, expected);
}

/// Random removals from a large heap
fn test_random_removals(d: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = 1000;
    let priorities: Vec<i32> = (0..n).map(|_| rng.gen_range(-500..500)).collect();
    let mut heap = DHeap::from_parts(d, HeapOrder::Max, (0..n).collect(), priorities.clone()).unwrap();

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    let (removed, kept) = order.split_at(n / 2);

    for &element in removed {
        assert_eq!(heap.remove(&element), Ok((element, priorities[element])));
    }
    assert!(heap.validate());
    assert_eq!(heap.len(), kept.len());

    let mut expected: Vec<i32> = kept.iter().map(|&e| priorities[e]).collect();
    expected.sort_by(|a, b| b.cmp(a));
    let extracted: Vec<i32> = heap.into_sorted_vec().into_iter().map(|(_, p)| p).collect();
    assert_eq!(extracted, expected);
}

#[test]
fn test_stress_binary() {
    test_massive_operations(2);
    test_alternating_ops(2);
    test_relax_workload(2, 7);
    test_random_removals(2, 7);
}

#[test]
fn test_stress_quaternary() {
    test_massive_operations(4);
    test_alternating_ops(4);
    test_relax_workload(4, 11);
    test_random_removals(4, 11);
}

#[test]
fn test_stress_wide() {
    for d in [7, 32, 1000] {
        test_massive_operations(d);
        test_alternating_ops(d);
        test_relax_workload(d, d as u64);
        test_random_removals(d, d as u64);
    }
}
