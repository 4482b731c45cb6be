//! Service fixtures
//!
//! A [`ServiceFixture`] wires a [`TagService`] to a controllable clock, seeded
//! randomness and an in-memory registry, and keeps handles to all three so
//! tests can move time or inspect storage directly.

use crate::random::SeededRandomHandler;
use crate::time::ControllableTimeSource;
use chrono::{DateTime, Utc};
use securetag_core::{
    demo_records, IssuePolicy, Result, SeedRecord, TagKind, TagRecord, TagService,
    DEFAULT_AUDIT_CAPACITY,
};
use securetag_effects::MemoryRegistryHandler;
use std::sync::Arc;

/// Test service plus handles to its effects
#[derive(Debug, Clone)]
pub struct ServiceFixture {
    /// Service under test
    pub service: Arc<TagService>,
    /// Clock shared with the service
    pub clock: ControllableTimeSource,
    /// Registry shared with the service
    pub registry: MemoryRegistryHandler,
    /// Randomness shared with the service
    pub random: SeededRandomHandler,
}

/// Builder for [`ServiceFixture`]
#[derive(Debug, Clone)]
pub struct ServiceFixtureBuilder {
    clock: ControllableTimeSource,
    random: SeededRandomHandler,
    audit_capacity: usize,
    policy: IssuePolicy,
    seeds: Vec<SeedRecord>,
    records: Vec<TagRecord>,
}

impl Default for ServiceFixtureBuilder {
    fn default() -> Self {
        Self {
            clock: ControllableTimeSource::fixed(),
            random: SeededRandomHandler::default(),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            policy: IssuePolicy::default(),
            seeds: Vec::new(),
            records: Vec::new(),
        }
    }
}

impl ServiceFixtureBuilder {
    /// Audit log capacity
    pub fn audit_capacity(mut self, capacity: usize) -> Self {
        self.audit_capacity = capacity;
        self
    }

    /// Issuing bounds
    pub fn issue_policy(mut self, policy: IssuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the randomness source
    pub fn random(mut self, random: SeededRandomHandler) -> Self {
        self.random = random;
        self
    }

    /// Start the clock at `start`
    pub fn starting_at(self, start: DateTime<Utc>) -> Self {
        self.clock.set(start);
        self
    }

    /// Seed the built-in demo registry
    pub fn with_demo_records(mut self) -> Self {
        self.seeds.extend(demo_records());
        self
    }

    /// Seed additional records
    pub fn with_seeds(mut self, seeds: impl IntoIterator<Item = SeedRecord>) -> Self {
        self.seeds.extend(seeds);
        self
    }

    /// Pre-register fully specified records
    pub fn with_records(mut self, records: impl IntoIterator<Item = TagRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Build the service and apply seeds
    pub async fn build(self) -> Result<ServiceFixture> {
        let registry = MemoryRegistryHandler::with_records(self.records);
        let service = TagService::new(
            Arc::new(registry.clone()),
            Arc::new(self.clock.clone()),
            Arc::new(self.random.clone()),
            self.audit_capacity,
        )
        .with_issue_policy(self.policy);
        service.seed(self.seeds).await?;

        Ok(ServiceFixture {
            service: Arc::new(service),
            clock: self.clock,
            registry,
            random: self.random,
        })
    }
}

impl ServiceFixture {
    /// Start building a fixture
    pub fn builder() -> ServiceFixtureBuilder {
        ServiceFixtureBuilder::default()
    }

    /// Fixture seeded with the demo registry at [`crate::fixed_now`]
    pub async fn demo() -> Result<Self> {
        Self::builder().with_demo_records().build().await
    }
}

/// A QR record valid until `valid_until`, with predictable field values
pub fn qr_record(id: &str, valid_until: DateTime<Utc>) -> TagRecord {
    TagRecord {
        id: id.to_string(),
        kind: TagKind::Qr,
        name: format!("Holder of {id}"),
        department: "Testing".to_string(),
        access_level: "Level 1".to_string(),
        valid_until,
        secure_token: Some("0".repeat(64)),
        created_at: valid_until - chrono::Duration::days(30),
        tag_type: None,
        content: None,
    }
}
