use memokit::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn main() {
    let calls = AtomicUsize::new(0);
    let char_count = MemoizedFn::with_max_memoized(
        |word: &String| {
            calls.fetch_add(1, Ordering::Relaxed);
            word.chars().count()
        },
        2,
    )
    .unwrap();

    println!("alpha -> {}", char_count.apply("alpha".to_string()));
    println!("alpha -> {}", char_count.apply("alpha".to_string()));
    println!("calls after repeat: {}", calls.load(Ordering::Relaxed));

    char_count.apply("beta".to_string());
    char_count.apply("gamma".to_string());
    char_count.apply("alpha".to_string());
    println!("calls after eviction: {}", calls.load(Ordering::Relaxed));

    let area = memoize_bi(|w: &u32, h: &u32| w * h);
    println!("area(3, 4) = {}", area.apply(3, 4));
    println!("key = {}", CompositeKey::new(3, 4));
}

// Expected output:
// alpha -> 5
// alpha -> 5
// calls after repeat: 1
// calls after eviction: 4
// area(3, 4) = 12
// key = (3, 4)
//
// Explanation: max_memoized=2. "beta" then "gamma" push "alpha" out, so the
// final apply("alpha") runs the delegate again.
