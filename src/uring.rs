//! io_uring-backed asynchronous I/O ring.
//!
//! Wraps an `io_uring` submission/completion queue pair with registered
//! fixed files, batched submission, and a durability barrier. Grounded on
//! `examples/original_source/include/shlog/libs/uring_aio.h` for the
//! control flow (opportunistic harvest, submit-batch threshold, blocking
//! drain on `fsync_and_wait`) and on the teacher's own io_uring driver,
//! `examples/bugthesystem-Flux/kaos-driver/src/uring.rs`, for how to drive
//! the `io-uring` crate's safe-ish API rather than raw `liburing` FFI.
//!
//! Owned exclusively by a single sink and accessed only from the drain
//! thread; never shared across threads.

#![cfg(all(target_os = "linux", feature = "io_uring"))]

use std::os::fd::RawFd;

use io_uring::{opcode, types, IoUring};

use crate::constants::{submit_batch, COMPLETE_BATCH, DEFAULT_QUEUE_DEPTH, SQ_THREAD_IDLE_MS};
use crate::error::{LogError, Result};

/// Construction-time configuration for an [`AsyncIoRing`].
#[derive(Debug, Clone, Copy)]
pub struct AsyncIoRingConfig {
    /// Kernel-side SQ polling: producers skip the submit syscall.
    pub sq_poll: bool,
    /// Whether file descriptors are pre-registered and addressed by index.
    pub fixed_fd: bool,
    /// Submission/completion queue depth.
    pub queue_depth: u32,
}

impl Default for AsyncIoRingConfig {
    fn default() -> Self {
        Self { sq_poll: true, fixed_fd: true, queue_depth: DEFAULT_QUEUE_DEPTH }
    }
}

/// An in-flight write's owned buffer, kept alive from SQE submission until
/// its CQE is consumed and reclaimed exactly once in `handle_cqe`.
struct WriteRequest {
    bytes: Vec<u8>,
    offset: i64,
    fd_or_index: i32,
}

/// Batched, kernel-assisted async writer with an `fsync` durability
/// barrier. See the component design for the exact operation semantics.
pub struct AsyncIoRing {
    ring: IoUring,
    pending: usize,
    registered_files: usize,
    fixed_fd: bool,
    submit_batch: usize,
    closed: bool,
}

impl AsyncIoRing {
    /// Construct the ring. Fatal on kernel feature mismatch (SQPOLL
    /// requested without fixed files on a kernel that requires them) or
    /// if the kernel rejects queue creation.
    pub fn new(config: AsyncIoRingConfig) -> Result<Self> {
        let mut builder = IoUring::builder();
        if config.sq_poll {
            builder.setup_sqpoll(SQ_THREAD_IDLE_MS);
        }

        let ring = builder
            .build(config.queue_depth)
            .map_err(|e| LogError::ring_construction(e.to_string()))?;

        if config.sq_poll && !config.fixed_fd {
            let supports_nonfixed = ring.params().is_feature_sqpoll_nonfixed();
            if !supports_nonfixed {
                return Err(LogError::kernel_feature_mismatch(
                    "SQPOLL requires fixed files on this kernel; register files and set fixed_fd=true",
                ));
            }
        }

        Ok(Self {
            ring,
            pending: 0,
            registered_files: 0,
            fixed_fd: config.fixed_fd,
            submit_batch: submit_batch(config.queue_depth),
            closed: false,
        })
    }

    /// Register `fds` as fixed files. Only meaningful when `fixed_fd` was
    /// requested at construction.
    pub fn register_fds(&mut self, fds: &[RawFd]) -> Result<()> {
        if !self.fixed_fd || fds.is_empty() {
            return Ok(());
        }
        self.ring
            .submitter()
            .register_files(fds)
            .map_err(|e| LogError::ring_construction(format!("register_files failed: {e}")))?;
        self.registered_files = fds.len();
        Ok(())
    }

    /// Unregister any registered files. Safe to call multiple times.
    pub fn unregister_fds(&mut self) {
        if self.registered_files == 0 {
            return;
        }
        if let Err(e) = self.ring.submitter().unregister_files() {
            eprintln!("logring: error unregistering files: {e}");
        }
        self.registered_files = 0;
    }

    /// Submit an async write of `bytes` at `offset` (`-1` delegates
    /// positioning to the kernel/file, only sensible for append-mode
    /// files) to `fd_or_index` (a fixed-file index when `fixed_fd`).
    pub fn write_async(&mut self, bytes: Vec<u8>, offset: i64, fd_or_index: i32) {
        if self.fixed_fd && self.registered_files == 0 {
            eprintln!("logring: no files registered but write_async requested fixed file");
            return;
        }

        if self.pending >= COMPLETE_BATCH {
            self.peek_completions();
        }

        self.get_sqe_or_wait();

        let len = bytes.len() as u32;
        let req = Box::new(WriteRequest { bytes, offset, fd_or_index });
        let ptr = req.bytes.as_ptr();
        let req_ptr = Box::into_raw(req);

        let entry = if self.fixed_fd {
            opcode::Write::new(types::Fixed(fd_or_index as u32), ptr, len)
        } else {
            opcode::Write::new(types::Fd(fd_or_index), ptr, len)
        }
        .offset(offset)
        .build()
        .user_data(req_ptr as u64);

        unsafe {
            if self.ring.submission().push(&entry).is_err() {
                eprintln!("logring: submission queue full, dropping record");
                // Reclaim the request we just leaked into user_data.
                drop(Box::from_raw(req_ptr));
                return;
            }
        }

        if self.pending >= self.submit_batch {
            if let Err(e) = self.ring.submit() {
                eprintln!("logring: submit failed: {e}");
                unsafe {
                    drop(Box::from_raw(req_ptr));
                }
                return;
            }
        }

        self.pending += 1;
    }

    /// Durability barrier: submit an `fsync`/`fdatasync` and block until
    /// every previously issued write (and this barrier) has been
    /// acknowledged by the kernel.
    pub fn fsync_and_wait(&mut self, fd_or_index: i32, data_only: bool) {
        self.get_sqe_or_wait();

        let flags = if data_only { types::FsyncFlags::DATASYNC } else { types::FsyncFlags::empty() };
        let entry = if self.fixed_fd {
            opcode::Fsync::new(types::Fixed(fd_or_index as u32))
        } else {
            opcode::Fsync::new(types::Fd(fd_or_index))
        }
        .flags(flags)
        .build()
        .user_data(0);

        unsafe {
            if self.ring.submission().push(&entry).is_err() {
                eprintln!("logring: failed to enqueue fsync");
                return;
            }
        }

        if let Err(e) = self.ring.submit() {
            eprintln!("logring: submit fsync failed: {e}");
            return;
        }
        self.pending += 1;

        self.wait_all();
    }

    /// Drain all in-flight I/O, unregister files, tear down the ring.
    /// Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.wait_all();
        self.unregister_fds();
        self.closed = true;
    }

    fn get_sqe_or_wait(&mut self) {
        if self.ring.submission().is_full() {
            self.wait_sq_space_left();
        }
    }

    fn wait_sq_space_left(&mut self) {
        while self.ring.submission().is_full() {
            self.peek_completions();
        }
    }

    fn wait_all(&mut self) {
        while self.pending > 0 {
            if let Err(e) = self.ring.submit_and_wait(1) {
                eprintln!("logring: submit_and_wait failed: {e}");
                break;
            }
            self.drain_completion_queue();
        }
    }

    /// Non-blocking harvest of whatever completions are already ready.
    fn peek_completions(&mut self) {
        self.drain_completion_queue();
    }

    fn drain_completion_queue(&mut self) {
        let mut retries: Vec<(Vec<u8>, i64, i32)> = Vec::new();
        {
            let cq = self.ring.completion();
            for cqe in cq {
                if let Some(retry) = Self::handle_cqe(cqe, &mut self.pending) {
                    retries.push(retry);
                }
            }
        }
        for (bytes, offset, fd_or_index) in retries {
            self.write_async(bytes, offset, fd_or_index);
        }
    }

    /// Reclaim the owned buffer for one completion. Returns `Some` with
    /// the unwritten remainder when a positioned write (`offset != -1`)
    /// came back short, so the caller can resubmit it; append-mode writes
    /// (`offset == -1`) can't be retried without losing their place in
    /// the file, so a short append write is only logged.
    fn handle_cqe(
        cqe: io_uring::cqueue::Entry,
        pending: &mut usize,
    ) -> Option<(Vec<u8>, i64, i32)> {
        let user_data = cqe.user_data();
        if user_data == 0 {
            // fsync completion: no owned bytes.
            *pending = pending.saturating_sub(1);
            return None;
        }

        let req = unsafe { Box::from_raw(user_data as *mut WriteRequest) };
        *pending = pending.saturating_sub(1);

        if cqe.result() < 0 {
            let err = std::io::Error::from_raw_os_error(-cqe.result());
            eprintln!(
                "logring: async write failed: {} for {} bytes at offset {}",
                err,
                req.bytes.len(),
                req.offset
            );
            return None;
        }

        let written = cqe.result() as usize;
        if written >= req.bytes.len() {
            return None;
        }

        if req.offset < 0 {
            eprintln!(
                "logring: short append write ({} of {} bytes), remainder dropped",
                written,
                req.bytes.len()
            );
            return None;
        }

        eprintln!(
            "logring: short write ({} of {} bytes at offset {}), resubmitting remainder",
            written,
            req.bytes.len(),
            req.offset
        );
        let WriteRequest { bytes, offset, fd_or_index } = *req;
        Some((bytes[written..].to_vec(), offset + written as i64, fd_or_index))
    }
}

impl Drop for AsyncIoRing {
    fn drop(&mut self) {
        self.close();
    }
}
