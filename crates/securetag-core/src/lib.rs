//! # SecureTag Core
//!
//! **Purpose**: Domain types and logic for badge / tag verification.
//!
//! A client presents a QR-code string or NFC tag identifier; the service looks
//! it up in a registry, checks the validity window and returns a verdict plus
//! the stored record. Every attempt lands in a bounded audit log from which
//! statistics are derived. An admin operation mints new QR tags.
//!
//! ## Core Concepts
//!
//! - **Registry**: `(kind, id) -> TagRecord`, reached through [`RegistryStorage`]
//! - **Verification**: lookup plus date comparison ([`verify`])
//! - **Audit log**: FIFO ring of [`AuditEntry`] ([`audit`])
//! - **Stats**: linear scan of the audit log ([`stats`])
//! - **Issuing**: random identifier and token generation ([`issue`])
//!
//! ## What's NOT in this crate
//!
//! - Effect handlers (belong in `securetag-effects` and `securetag-testkit`)
//! - HTTP wiring and configuration (belongs in `securetag-server`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Bounded audit log
pub mod audit;

/// Effect traits for clock, randomness and registry storage
pub mod effects;

/// Unified error type
pub mod errors;

/// Admin issuing of new tags
pub mod issue;

/// Registry seed records
pub mod seed;

/// Service handle tying registry, audit log and effects together
pub mod service;

/// Statistics over the audit log
pub mod stats;

/// Registry, verification and audit types
pub mod types;

/// Verification decision logic
pub mod verify;

pub use audit::{
    AuditFilter, AuditLog, AuditPage, OutcomeFilter, DEFAULT_AUDIT_CAPACITY, DEFAULT_QUERY_LIMIT,
};
pub use effects::{PhysicalTimeEffects, PutOutcome, RandomEffects, RegistryStorage};
pub use errors::{Result, SecureTagError};
pub use issue::{IssuePolicy, IssueRequest, VALID_DAYS_LIMIT};
pub use seed::{demo_records, SeedRecord, DEMO_INVALID_CODES, DEMO_VERIFIED_CODES};
pub use service::TagService;
pub use stats::{SystemStats, WindowStats};
pub use types::{
    AuditEntry, AuditEventKind, AuditOutcome, TagKind, TagRecord, VerificationResult, Verdict,
};
