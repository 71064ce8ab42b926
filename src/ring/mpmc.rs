//! Bounded multi-producer/multi-consumer ring buffer.
//!
//! Grounded on `examples/original_source/include/shlog/libs/mpmc_queue.hpp`:
//! a single monotonic `tail`/`head` counter per role, and a per-slot ticket
//! whose parity gates eligibility. For slot index `s = ticket % capacity`
//! and generation `turn = ticket / capacity`, a producer may publish once
//! the slot's ticket equals `2 * turn`, and stores `2 * turn + 1`; a
//! consumer may read once the slot's ticket equals `2 * turn + 1`, and
//! stores `2 * turn + 2`. This is the classic bounded MPMC ticket ring
//! (as implemented, with different surface names, in
//! `examples/debasishg-ringmpsc-rs`); ordering and slot layout otherwise
//! follow the teacher's (`flux`) `Release`/`Acquire` fence discipline.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

struct Slot<T> {
    ticket: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

/// Fixed-capacity MPMC ring. Producers and consumers may be any number of
/// threads; progress is guaranteed as long as peers keep making progress
/// (a producer or consumer that dies mid-operation blocks its slot
/// permanently — the logger must never kill threads mid-`emplace`).
pub struct MpmcRing<T> {
    slots: Box<[Slot<T>]>,
    capacity: usize,
    tail: AtomicU64,
    head: AtomicU64,
}

unsafe impl<T: Send> Send for MpmcRing<T> {}
unsafe impl<T: Send> Sync for MpmcRing<T> {}

impl<T> MpmcRing<T> {
    /// Create a ring with `capacity` slots. Every slot starts eligible for
    /// its first (generation-0) producer.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "MpmcRing capacity must be at least 1");
        let slots = (0..capacity)
            .map(|_| Slot {
                ticket: AtomicUsize::new(0),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots,
            capacity,
            tail: AtomicU64::new(0),
            head: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    fn idx(&self, ticket: u64) -> usize {
        (ticket as usize) % self.capacity
    }

    #[inline(always)]
    fn turn(&self, ticket: u64) -> usize {
        (ticket as usize) / self.capacity
    }

    /// Claim a ticket and publish `value`. Never fails; spins on its slot
    /// until eligible. This is intentional back-pressure for overloaded
    /// producers rather than a silent drop.
    pub fn emplace(&self, value: T) {
        let ticket = self.tail.fetch_add(1, Ordering::Relaxed);
        let id = self.idx(ticket);
        let slot = &self.slots[id];
        let want = self.turn(ticket) * 2;

        while slot.ticket.load(Ordering::Acquire) != want {
            std::hint::spin_loop();
        }

        unsafe {
            (*slot.value.get()).write(value);
        }
        slot.ticket.store(want + 1, Ordering::Release);
    }

    /// Claim a consumer ticket and move its value out. Never fails; spins
    /// until the producer for that slot has published.
    pub fn pop(&self) -> T {
        let ticket = self.head.fetch_add(1, Ordering::Relaxed);
        let id = self.idx(ticket);
        let slot = &self.slots[id];
        let want = self.turn(ticket) * 2 + 1;

        while slot.ticket.load(Ordering::Acquire) != want {
            std::hint::spin_loop();
        }

        let value = unsafe { (*slot.value.get()).assume_init_read() };
        slot.ticket.store(want + 1, Ordering::Release);
        value
    }

    /// Non-blocking pop: returns `None` immediately if no ticket has been
    /// claimed by a producer yet (rather than spinning on a slot whose
    /// producer simply hasn't run). Used by the drain loop, which must
    /// never block waiting for work that may never arrive.
    pub fn try_pop(&self) -> Option<T> {
        if self.empty() {
            return None;
        }
        Some(self.pop())
    }

    /// Approximate occupied count, computed from the two counters.
    pub fn size(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        tail.saturating_sub(head) as usize
    }

    /// Approximate emptiness check.
    pub fn empty(&self) -> bool {
        self.tail.load(Ordering::Acquire) == self.head.load(Ordering::Acquire)
    }
}

impl<T> Drop for MpmcRing<T> {
    fn drop(&mut self) {
        // Any slot whose ticket is odd (published, not yet consumed) still
        // owns a live value that must be dropped in place.
        for slot in self.slots.iter_mut() {
            if slot.ticket.get_mut() % 2 == 1 {
                unsafe {
                    (*slot.value.get()).assume_init_drop();
                }
            }
        }
    }
}
