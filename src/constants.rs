//! logring performance and sizing constants.
//!
//! Named constants for the ring buffers and the async I/O ring, so the
//! thresholds in the component design show up in one place to tune rather
//! than as magic numbers scattered through the implementation.

/// Default capacity for a logger's job ring (SPSC or MPMC), in slots.
/// Must be a power of two.
pub const DEFAULT_RING_CAPACITY: usize = 8192;

/// Cache line size for alignment (64 bytes on most CPUs).
pub const CACHE_LINE_SIZE: usize = 64;

/// Default submission/completion queue depth for the async I/O ring.
pub const DEFAULT_QUEUE_DEPTH: u32 = 512;

/// Opportunistic completion harvest size: once this many writes are
/// in flight, `write_async` drains ready completions before submitting
/// another, to keep `pending_` bounded without blocking.
pub const COMPLETE_BATCH: usize = 24;

/// Derive the submit-batch threshold for a given queue depth: flush
/// accumulated submissions once this many are pending.
#[inline(always)]
pub const fn submit_batch(queue_depth: u32) -> usize {
    (queue_depth / 2) as usize
}

/// SQPOLL kernel thread idle timeout, in milliseconds, before the kernel
/// poller parks itself waiting for new submissions.
pub const SQ_THREAD_IDLE_MS: u32 = 2000;

/// File mode used when creating sink-backed log files: owner read/write
/// only, matching the reference implementation's `S_IRUSR | S_IWUSR`.
pub const LOG_FILE_MODE: u32 = 0o600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_capacity_is_power_of_two() {
        assert!(DEFAULT_RING_CAPACITY.is_power_of_two());
    }

    #[test]
    fn test_submit_batch_is_half_queue_depth() {
        assert_eq!(submit_batch(512), 256);
        assert_eq!(submit_batch(DEFAULT_QUEUE_DEPTH), 256);
    }
}
