//! Bounded single-producer/single-consumer ring buffer.
//!
//! Grounded on `examples/original_source/include/spsc_queue.hpp`: a fixed
//! slot array with `head`/`tail` indices modulo `capacity`, one slot always
//! sacrificed so `(tail + 1) % capacity == head` unambiguously means full.
//! Atomic ordering follows the teacher's (`flux`) producer/consumer cursor
//! discipline: the publishing store is `Release`, the opposing load is
//! `Acquire`, so writes into a slot happen-before the consumer observes it.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-capacity SPSC ring. `T` need not be `Clone`/`Default` — values are
/// moved in and out through `MaybeUninit` slots.
///
/// # Safety contract
/// Single producer, single consumer. Calling `try_emplace` concurrently
/// from two threads (or `try_pop` from two threads) is undefined behavior;
/// nothing here detects that misuse. If a user's emit path can reach the
/// logger from more than one thread, use [`super::mpmc::MpmcRing`] instead.
pub struct SpscRing<T> {
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    capacity: usize,
    head: AtomicUsize,
    tail: AtomicUsize,
}

unsafe impl<T: Send> Send for SpscRing<T> {}
unsafe impl<T: Send> Sync for SpscRing<T> {}

impl<T> SpscRing<T> {
    /// Create a ring with room for `capacity - 1` live values (one slot is
    /// sacrificed to disambiguate full from empty).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "SpscRing capacity must be at least 2");
        let buffer = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            buffer,
            capacity,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Try to push `value`. Returns `false` (and gives the value back via
    /// drop) when the ring is full; never panics, never blocks.
    pub fn try_emplace(&self, value: T) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let next = (tail + 1) % self.capacity;
        if next == self.head.load(Ordering::Acquire) {
            return false;
        }

        unsafe {
            (*self.buffer[tail].get()).write(value);
        }
        self.tail.store(next, Ordering::Release);
        true
    }

    /// Try to pop the oldest value. Returns `None` when empty.
    pub fn try_pop(&self) -> Option<T> {
        let head = self.head.load(Ordering::Relaxed);
        if head == self.tail.load(Ordering::Acquire) {
            return None;
        }

        let value = unsafe { (*self.buffer[head].get()).assume_init_read() };
        self.head.store((head + 1) % self.capacity, Ordering::Release);
        Some(value)
    }

    /// Approximate, monotonic-under-SPSC-use occupied count.
    pub fn size(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        if tail >= head { tail - head } else { tail + self.capacity - head }
    }

    /// Approximate emptiness check.
    pub fn empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Number of live slots (one less than the allocated capacity).
    pub fn usable_capacity(&self) -> usize {
        self.capacity - 1
    }
}

impl<T> Drop for SpscRing<T> {
    fn drop(&mut self) {
        let mut i = *self.head.get_mut();
        let tail = *self.tail.get_mut();
        while i != tail {
            unsafe {
                (*self.buffer[i].get()).assume_init_drop();
            }
            i = (i + 1) % self.capacity;
        }
    }
}
