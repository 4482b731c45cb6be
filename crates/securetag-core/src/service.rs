//! Tag service: registry, verifier, audit log and stats behind one handle
//!
//! The service owns the audit log and holds the registry and effect handlers
//! it was built with. HTTP handlers share it through an `Arc`; every method
//! takes `&self`, and no lock is held across an `.await`.

use crate::audit::{AuditFilter, AuditLog, AuditPage};
use crate::effects::{PhysicalTimeEffects, PutOutcome, RandomEffects, RegistryStorage};
use crate::issue::{
    mint, tag_identifier, IssuePolicy, IssueRequest, IDENTIFIER_SUFFIX_BYTES, MAX_ISSUE_ATTEMPTS,
    SECURE_TOKEN_BYTES,
};
use crate::seed::SeedRecord;
use crate::stats::{summarize_window, SystemStats};
use crate::types::{AuditEntry, TagKind, TagRecord, VerificationResult};
use crate::verify::{evaluate, require_identifier};
use crate::{Result, SecureTagError};
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared verification service
pub struct TagService {
    registry: Arc<dyn RegistryStorage>,
    audit: AuditLog,
    time: Arc<dyn PhysicalTimeEffects>,
    random: Arc<dyn RandomEffects>,
    policy: IssuePolicy,
}

impl std::fmt::Debug for TagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagService")
            .field("audit", &self.audit)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl TagService {
    /// Create a service over the given registry and effect handlers
    pub fn new(
        registry: Arc<dyn RegistryStorage>,
        time: Arc<dyn PhysicalTimeEffects>,
        random: Arc<dyn RandomEffects>,
        audit_capacity: usize,
    ) -> Self {
        Self {
            registry,
            audit: AuditLog::new(audit_capacity),
            time,
            random,
            policy: IssuePolicy::default(),
        }
    }

    /// Override the issuing bounds
    pub fn with_issue_policy(mut self, policy: IssuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Issuing bounds in effect
    pub fn issue_policy(&self) -> IssuePolicy {
        self.policy
    }

    /// Audit log handle
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Current time from the injected clock
    pub async fn now(&self) -> DateTime<Utc> {
        self.time.now().await
    }

    /// Verify a tag and record the attempt.
    ///
    /// A blank identifier is rejected without touching the audit log; every
    /// other call appends exactly one audit entry whatever the verdict.
    pub async fn verify(
        &self,
        kind: TagKind,
        identifier: Option<&str>,
        ip: Option<IpAddr>,
    ) -> Result<VerificationResult> {
        let identifier = require_identifier(kind, identifier)?;
        let record = self.registry.get(kind, identifier).await?;
        let now = self.time.now().await;
        let result = evaluate(kind, identifier, record, now);

        self.audit.record(AuditEntry::from_result(&result, ip));
        info!(
            kind = %kind,
            tag_id = identifier,
            verified = result.verified(),
            "{}: {}",
            kind.audit_event().as_str(),
            if result.verified() { "VERIFIED" } else { "FAILED" }
        );
        Ok(result)
    }

    /// Mint and register a new QR tag
    pub async fn issue(&self, request: &IssueRequest) -> Result<TagRecord> {
        let issue = request.validate(&self.policy)?;
        let secure_token = self.random.random_hex(SECURE_TOKEN_BYTES).await;

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let suffix = self.random.random_bytes(IDENTIFIER_SUFFIX_BYTES).await;
            let id = tag_identifier(&issue.department, &suffix);
            let now = self.time.now().await;
            let record = mint(&issue, id, secure_token.clone(), now)?;

            match self.registry.put(record.clone()).await? {
                PutOutcome::Inserted => {
                    info!(
                        tag_id = %record.id,
                        department = %record.department,
                        valid_until = %record.valid_until,
                        "Issued QR tag"
                    );
                    return Ok(record);
                }
                PutOutcome::AlreadyExists => {
                    warn!(tag_id = %record.id, attempt, "Generated identifier collided, retrying");
                }
            }
        }

        Err(SecureTagError::internal(format!(
            "could not generate a unique identifier after {MAX_ISSUE_ATTEMPTS} attempts"
        )))
    }

    /// Register seed records, skipping identifiers that are already taken.
    ///
    /// Returns the number of records inserted.
    pub async fn seed(&self, seeds: impl IntoIterator<Item = SeedRecord>) -> Result<usize> {
        let now = self.time.now().await;
        let mut inserted = 0;
        for seed in seeds {
            let token = if seed.issue_token {
                Some(self.random.random_hex(SECURE_TOKEN_BYTES).await)
            } else {
                None
            };
            let record = seed.into_record(now, token)?;
            let (kind, id) = (record.kind, record.id.clone());
            match self.registry.put(record).await? {
                PutOutcome::Inserted => {
                    debug!(kind = %kind, tag_id = %id, "Seeded registry record");
                    inserted += 1;
                }
                PutOutcome::AlreadyExists => {
                    warn!(kind = %kind, tag_id = %id, "Duplicate seed record ignored");
                }
            }
        }
        Ok(inserted)
    }

    /// All records of one kind
    pub async fn records(&self, kind: TagKind) -> Result<Vec<TagRecord>> {
        self.registry.scan(kind).await
    }

    /// Most-recent-first audit entries
    pub fn audit_logs(&self, filter: &AuditFilter, limit: usize) -> AuditPage {
        self.audit.page(filter, limit)
    }

    /// Registry totals and last-24h verification counts
    pub async fn stats(&self) -> Result<SystemStats> {
        let total_qr_codes = self.registry.count(TagKind::Qr).await?;
        let total_nfc_tags = self.registry.count(TagKind::Nfc).await?;
        let now = self.time.now().await;
        let entries = self.audit.snapshot();

        Ok(SystemStats {
            total_qr_codes,
            total_nfc_tags,
            total_scans: entries.len(),
            last_24_hours: summarize_window(&entries, now),
        })
    }
}
