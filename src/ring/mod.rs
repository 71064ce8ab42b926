//! Bounded lock-free ring buffers.
//!
//! | Discipline | Type | Notes |
//! |---|---|---|
//! | SPSC | [`spsc::SpscRing`] | wait-free; full ring observed via `false` return |
//! | MPMC | [`mpmc::MpmcRing`] | wait-free when space exists, spins under sustained overload |

pub mod mpmc;
pub mod spsc;

pub use mpmc::MpmcRing;
pub use spsc::SpscRing;
