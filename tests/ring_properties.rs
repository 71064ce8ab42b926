//! Property-based invariants for the bounded rings, mirroring the style
//! of `examples/debasishg-ringmpsc-rs/crates/ringmpsc/tests/property_tests.rs`:
//! one `proptest!` block per invariant from the component design rather
//! than a single catch-all fuzz test.

use proptest::prelude::*;

use logring::{MpmcRing, SpscRing};

const SPSC_CAPACITY: usize = 64;

proptest! {
    /// SPSC FIFO: any sequence of successful `try_emplace`s is observed
    /// by the consumer in the same order, with no value lost or
    /// duplicated.
    #[test]
    fn prop_spsc_fifo_order(values in prop::collection::vec(any::<u32>(), 0..200)) {
        let ring = SpscRing::<u32>::new(SPSC_CAPACITY);
        let mut accepted = Vec::new();
        for v in values {
            if ring.try_emplace(v) {
                accepted.push(v);
            }
        }

        let mut observed = Vec::new();
        while let Some(v) = ring.try_pop() {
            observed.push(v);
        }

        prop_assert_eq!(observed, accepted);
    }

    /// SPSC boundedness: after `capacity - 1` successful emplaces without
    /// a pop, the next emplace must fail.
    #[test]
    fn prop_spsc_boundedness(capacity in 2usize..128) {
        let ring = SpscRing::<u32>::new(capacity);
        for i in 0..(capacity - 1) as u32 {
            prop_assert!(ring.try_emplace(i));
        }
        prop_assert!(!ring.try_emplace(u32::MAX));
    }
}

proptest! {
    /// MPMC liveness: `n` emplaces (`n` may exceed the ring's capacity)
    /// are followed by exactly `n` successful pops in issuing order,
    /// with no value lost, gained, or reordered. The producer and
    /// consumer run on separate threads — `emplace` never fails, but it
    /// spins once the ring is full until a consumer advances, so a
    /// single-threaded producer loop would deadlock for any `n` beyond
    /// capacity (see `src/ring/mpmc.rs`'s own
    /// `test_mpmc_contention_total_order_per_producer`, which drives the
    /// ring the same concurrent way).
    #[test]
    fn prop_mpmc_total_order(n in 0usize..500) {
        let ring = std::sync::Arc::new(MpmcRing::<usize>::new(128));

        let producer_ring = ring.clone();
        let producer = std::thread::spawn(move || {
            for i in 0..n {
                producer_ring.emplace(i);
            }
        });

        let mut observed = Vec::with_capacity(n);
        for _ in 0..n {
            observed.push(ring.pop());
        }
        producer.join().unwrap();

        prop_assert_eq!(observed, (0..n).collect::<Vec<_>>());
        prop_assert!(ring.empty());
    }
}
