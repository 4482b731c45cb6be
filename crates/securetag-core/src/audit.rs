//! Bounded in-memory audit log
//!
//! Entries are appended in arrival order and the oldest entry is evicted once
//! the log is full. Entries are never re-read for mutation, so eviction is
//! plain FIFO over a `VecDeque`.

use crate::types::{AuditEntry, AuditEventKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries retained
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

/// Default page size for [`AuditLog::query`]
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Outcome filter for audit queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeFilter {
    /// Only accepted verifications
    Verified,
    /// Only rejected verifications
    Failed,
}

/// Audit query filter; `None` fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Restrict to one event type
    pub event: Option<AuditEventKind>,
    /// Restrict to one outcome
    pub outcome: Option<OutcomeFilter>,
}

impl AuditFilter {
    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(event) = self.event {
            if entry.event != event {
                return false;
            }
        }
        match self.outcome {
            Some(OutcomeFilter::Verified) => entry.result.verified,
            Some(OutcomeFilter::Failed) => !entry.result.verified,
            None => true,
        }
    }
}

/// One page of audit entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditPage {
    /// Most-recent-first matching entries
    pub logs: Vec<AuditEntry>,
    /// Entries currently retained, ignoring the filter
    pub total: usize,
}

/// Append-only audit log with a fixed capacity
#[derive(Debug)]
pub struct AuditLog {
    entries: Mutex<VecDeque<AuditEntry>>,
    capacity: usize,
}

impl AuditLog {
    /// Create an empty log holding at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Append an entry, evicting the oldest one when full
    pub fn record(&self, entry: AuditEntry) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most-recent-first entries matching `filter`, at most `limit` of them
    pub fn query(&self, filter: &AuditFilter, limit: usize) -> Vec<AuditEntry> {
        self.page(filter, limit).logs
    }

    /// [`AuditLog::query`] plus the unfiltered length, read under one lock
    pub fn page(&self, filter: &AuditFilter, limit: usize) -> AuditPage {
        let entries = self.entries.lock();
        let logs = entries
            .iter()
            .rev()
            .filter(|entry| filter.matches(entry))
            .take(limit)
            .cloned()
            .collect();
        AuditPage {
            logs,
            total: entries.len(),
        }
    }

    /// All entries in insertion order
    pub fn snapshot(&self) -> Vec<AuditEntry> {
        self.entries.lock().iter().cloned().collect()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuditOutcome;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn entry(n: usize, event: AuditEventKind, verified: bool) -> AuditEntry {
        AuditEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::seconds(n as i64),
            event,
            tag_id: format!("TAG{n:04}"),
            result: AuditOutcome {
                verified,
                message: String::new(),
            },
            ip: None,
        }
    }

    #[test]
    fn test_query_is_most_recent_first() {
        let log = AuditLog::new(10);
        for n in 0..3 {
            log.record(entry(n, AuditEventKind::QrVerification, true));
        }
        let ids: Vec<_> = log
            .query(&AuditFilter::default(), 10)
            .into_iter()
            .map(|e| e.tag_id)
            .collect();
        assert_eq!(ids, vec!["TAG0002", "TAG0001", "TAG0000"]);
    }

    #[test]
    fn test_query_filters_and_limits() {
        let log = AuditLog::new(10);
        log.record(entry(0, AuditEventKind::QrVerification, true));
        log.record(entry(1, AuditEventKind::NfcVerification, false));
        log.record(entry(2, AuditEventKind::QrVerification, false));
        log.record(entry(3, AuditEventKind::QrVerification, true));

        let qr = AuditFilter {
            event: Some(AuditEventKind::QrVerification),
            outcome: None,
        };
        assert_eq!(log.query(&qr, 10).len(), 3);
        assert_eq!(log.query(&qr, 2)[0].tag_id, "TAG0003");

        let failed_qr = AuditFilter {
            event: Some(AuditEventKind::QrVerification),
            outcome: Some(OutcomeFilter::Failed),
        };
        let failed = log.query(&failed_qr, 10);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].tag_id, "TAG0002");

        assert!(log.query(&AuditFilter::default(), 0).is_empty());
    }

    #[test]
    fn test_page_total_ignores_filter() {
        let log = AuditLog::new(3);
        for n in 0..5 {
            log.record(entry(n, AuditEventKind::NfcVerification, n % 2 == 0));
        }
        let verified = AuditFilter {
            event: None,
            outcome: Some(OutcomeFilter::Verified),
        };
        let page = log.page(&verified, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.logs.len(), 1);
        assert_eq!(page.logs[0].tag_id, "TAG0004");
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let log = AuditLog::new(0);
        assert_eq!(log.capacity(), 1);
        log.record(entry(0, AuditEventKind::QrVerification, true));
        log.record(entry(1, AuditEventKind::QrVerification, true));
        assert_eq!(log.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_log_keeps_latest_capacity_entries(capacity in 1usize..64, appends in 0usize..256) {
            let log = AuditLog::new(capacity);
            for n in 0..appends {
                log.record(entry(n, AuditEventKind::QrVerification, n % 2 == 0));
                prop_assert!(log.len() <= capacity);
            }

            let kept: Vec<_> = log.snapshot().into_iter().map(|e| e.tag_id).collect();
            let first = appends.saturating_sub(capacity);
            let expected: Vec<_> = (first..appends).map(|n| format!("TAG{n:04}")).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
