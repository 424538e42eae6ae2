use memokit::prelude::*;

fn main() {
    let registry = PressureRegistry::new();

    let squares = CacheBuilder::new()
        .max_size(100)
        .reclaim_under(&registry)
        .build::<u64, u64>()
        .unwrap();
    let names = MemoizeBuilder::new()
        .delegate(|id: &u32| format!("user-{id}"))
        .max_memoized(100)
        .reclaim_under(&registry)
        .build()
        .unwrap();

    for i in 0..10u32 {
        squares.get_or_compute(u64::from(i), |k| k * k);
        names.apply(i);
    }
    println!("before: squares={} names={}", squares.len(), names.memoized_len());

    let discarded = registry.relieve();
    println!("relieved {} entries", discarded);
    println!("after: squares={} names={}", squares.len(), names.memoized_len());

    println!("square(7) = {}", squares.get_or_compute(7, |k| k * k));
    println!("squares now holds {}", squares.len());
}

// Expected output:
// before: squares=10 names=10
// relieved 20 entries
// after: squares=0 names=0
// square(7) = 49
// squares now holds 1
//
// Explanation: both caches are registered with the same registry. relieve()
// drops each backing store; the next write recreates an empty one.
