// ==============================================
// MEMOIZATION CONCURRENCY TESTS (integration)
// ==============================================
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

mod exactly_once {
    use memokit::cache::synchronized::SynchronizedCache;
    use memokit::memo::{MemoizedBiFn, MemoizedFn};

    use super::*;

    #[test]
    fn concurrent_callers_share_one_computation() {
        let num_threads = 16;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Arc::new(MemoizedFn::new(move |n: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            (1..=*n).product::<u64>()
        }));
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let memo = Arc::clone(&memo);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    memo.apply(10)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3_628_800);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disjoint_keys_are_each_computed_once() {
        let num_threads = 8;
        let keys_per_thread = 50u32;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Arc::new(
            MemoizedFn::with_max_memoized(
                move |k: &u32| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    k * 2
                },
                1024,
            )
            .unwrap(),
        );

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let memo = Arc::clone(&memo);
                thread::spawn(move || {
                    for k in 0..keys_per_thread {
                        assert_eq!(memo.apply(k), k * 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every thread asks for the same 50 keys; the bound is never reached.
        assert_eq!(calls.load(Ordering::SeqCst), keys_per_thread as usize);
        assert_eq!(memo.memoized_len(), keys_per_thread as usize);
    }

    #[test]
    fn bounded_cache_stays_within_bound_under_contention() {
        let cache: SynchronizedCache<u32, u32> = SynchronizedCache::new(32).unwrap();
        let handles: Vec<_> = (0..8u32)
            .map(|thread_id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500u32 {
                        let key = (thread_id * 1_000) + (i % 97);
                        cache.get_or_compute(key, |k| k + 1);
                        assert!(cache.len() <= 32);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 32);
        assert!(cache.is_full());
    }

    #[test]
    fn binary_memo_from_many_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Arc::new(MemoizedBiFn::new(move |a: &String, b: &u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            a.repeat(*b as usize)
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let memo = Arc::clone(&memo);
                thread::spawn(move || memo.apply("ab".to_string(), 3))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "ababab");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

mod reclamation_under_load {
    use memokit::cache::synchronized::SynchronizedCache;
    use memokit::pressure::PressureRegistry;

    use super::*;

    #[test]
    fn relieve_while_writers_run() {
        let registry = PressureRegistry::new();
        let cache: SynchronizedCache<u64, u64> = SynchronizedCache::new(64).unwrap();
        registry.register_cache(&cache);

        let writers: Vec<_> = (0..4u64)
            .map(|thread_id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..1_000u64 {
                        let key = thread_id * 10_000 + (i % 128);
                        assert_eq!(cache.get_or_compute(key, |k| k * 3), key * 3);
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            registry.relieve();
            thread::yield_now();
        }
        for writer in writers {
            writer.join().unwrap();
        }

        assert!(cache.len() <= 64);
        registry.relieve();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_compute(7, |k| k * 3), 21);
    }
}
