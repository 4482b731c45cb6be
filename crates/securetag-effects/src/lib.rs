//! # SecureTag Effects
//!
//! Production implementations of the effect traits defined in
//! `securetag-core`: the system clock, OS-backed randomness and the in-memory
//! registry. Deterministic handlers for tests live in `securetag-testkit`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Random bytes from the thread-local CSPRNG
pub mod random;

/// Registry storage handlers
pub mod registry;

/// System clock
pub mod time;

pub use random::RealRandomHandler;
pub use registry::MemoryRegistryHandler;
pub use time::RealTimeHandler;
