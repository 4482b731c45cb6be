//! # SecureTag Testkit
//!
//! Deterministic effect handlers and fixtures shared by the workspace's
//! tests: a clock that only moves when told to, seeded (optionally scripted)
//! randomness, and a builder that wires them into a [`TagService`].
//!
//! [`TagService`]: securetag_core::TagService

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Service fixtures and record builders
pub mod fixtures;

/// Seeded randomness
pub mod random;

/// Controllable clock
pub mod time;

pub use fixtures::{qr_record, ServiceFixture, ServiceFixtureBuilder};
pub use random::SeededRandomHandler;
pub use time::{fixed_now, ControllableTimeSource};
