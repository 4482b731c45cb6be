//! Verification statistics derived from the audit log

use crate::types::AuditEntry;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the recent-activity window
pub const STATS_WINDOW_HOURS: i64 = 24;

/// Counts over the recent-activity window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    /// Attempts inside the window
    pub total: usize,
    /// Accepted attempts
    pub successful: usize,
    /// Rejected attempts
    pub failed: usize,
    /// `successful / total` as a percentage with two decimals, `"0%"` when empty
    pub success_rate: String,
}

/// Registry and audit totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Registered QR codes
    #[serde(rename = "totalQRCodes")]
    pub total_qr_codes: usize,
    /// Registered NFC tags
    #[serde(rename = "totalNFCTags")]
    pub total_nfc_tags: usize,
    /// Entries currently retained in the audit log
    #[serde(rename = "totalScans")]
    pub total_scans: usize,
    /// Activity in the last 24 hours
    #[serde(rename = "last24Hours")]
    pub last_24_hours: WindowStats,
}

/// Format a success percentage
pub fn success_rate(successful: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let rate = successful as f64 / total as f64 * 100.0;
    format!("{rate:.2}%")
}

/// Count the entries newer than `now - 24h`
pub fn summarize_window<'a>(
    entries: impl IntoIterator<Item = &'a AuditEntry>,
    now: DateTime<Utc>,
) -> WindowStats {
    let cutoff = now - Duration::hours(STATS_WINDOW_HOURS);
    let (mut successful, mut failed) = (0usize, 0usize);
    for entry in entries.into_iter().filter(|e| e.timestamp > cutoff) {
        if entry.result.verified {
            successful += 1;
        } else {
            failed += 1;
        }
    }

    let total = successful + failed;
    WindowStats {
        total,
        successful,
        failed,
        success_rate: success_rate(successful, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuditEventKind, AuditOutcome};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(ts: DateTime<Utc>, verified: bool) -> AuditEntry {
        AuditEntry {
            timestamp: ts,
            event: AuditEventKind::QrVerification,
            tag_id: "T".to_string(),
            result: AuditOutcome {
                verified,
                message: String::new(),
            },
            ip: None,
        }
    }

    #[test]
    fn test_empty_window_rate_is_zero() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let stale = at(now - Duration::hours(25), true);
        let stats = summarize_window([&stale], now);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.success_rate, "0%");
    }

    #[test]
    fn test_window_excludes_exact_cutoff() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let entries = [
            at(now - Duration::hours(24), true),
            at(now - Duration::hours(23), true),
            at(now - Duration::minutes(5), false),
            at(now, false),
        ];
        let stats = summarize_window(&entries, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.success_rate, "33.33%");
    }

    #[test]
    fn test_rate_formatting() {
        assert_eq!(success_rate(2, 3), "66.67%");
        assert_eq!(success_rate(1, 1), "100.00%");
        assert_eq!(success_rate(0, 4), "0.00%");
    }

    #[test]
    fn test_system_stats_wire_names() {
        let stats = SystemStats {
            total_qr_codes: 7,
            total_nfc_tags: 1,
            total_scans: 0,
            last_24_hours: WindowStats {
                total: 0,
                successful: 0,
                failed: 0,
                success_rate: success_rate(0, 0),
            },
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalQRCodes"], 7);
        assert_eq!(json["totalNFCTags"], 1);
        assert_eq!(json["last24Hours"]["successRate"], "0%");
    }

    proptest! {
        #[test]
        fn prop_rate_matches_rounded_ratio(total in 1usize..10_000, pick in 0usize..10_000) {
            let successful = pick % (total + 1);
            let rate = success_rate(successful, total);
            let value: f64 = rate.trim_end_matches('%').parse().unwrap();
            let exact = successful as f64 / total as f64 * 100.0;
            prop_assert!((value - exact).abs() <= 0.005 + f64::EPSILON * 100.0);
            prop_assert!(rate.ends_with('%'));
        }
    }
}
