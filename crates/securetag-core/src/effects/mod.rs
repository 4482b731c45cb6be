//! Effect traits
//!
//! Everything the domain logic needs from the outside world (clock,
//! randomness, record storage) is expressed as a trait here. Production
//! handlers live in `securetag-effects`; deterministic handlers for tests live
//! in `securetag-testkit`.

pub mod random;
pub mod registry;
pub mod time;

pub use random::RandomEffects;
pub use registry::{PutOutcome, RegistryStorage};
pub use time::PhysicalTimeEffects;
