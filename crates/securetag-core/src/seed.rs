//! Registry seed records
//!
//! Seeds describe records to pre-register at startup, either the built-in
//! demo set or entries from the `[[records]]` section of the server config.
//! Validity is given as an absolute end date or as days relative to startup.

use crate::issue::expiry_after;
use crate::types::{TagKind, TagRecord};
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Validity used when a seed gives neither `valid_until` nor `valid_days`
pub const DEFAULT_SEED_VALID_DAYS: i64 = 365;

/// Demo QR codes expected to verify
pub const DEMO_VERIFIED_CODES: [&str; 2] = ["VERIFIED001", "VERIFIED002"];

/// Demo QR codes expected to fail
pub const DEMO_INVALID_CODES: [&str; 1] = ["INVALID001"];

fn default_kind() -> TagKind {
    TagKind::Qr
}

fn default_true() -> bool {
    true
}

/// Record to pre-register at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Registry key
    pub id: String,
    /// Namespace, QR unless stated
    #[serde(default = "default_kind")]
    pub kind: TagKind,
    /// Owner name
    pub name: String,
    /// Owning department
    pub department: String,
    /// Access level label
    pub access_level: String,
    /// Absolute end of validity
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    /// Validity relative to startup; negative values seed an already-expired record
    #[serde(default)]
    pub valid_days: Option<i64>,
    /// Whether to generate a secure token for the record
    #[serde(default = "default_true")]
    pub issue_token: bool,
    /// NFC chip type
    #[serde(default)]
    pub tag_type: Option<String>,
    /// NFC payload description
    #[serde(default)]
    pub content: Option<String>,
}

impl SeedRecord {
    fn qr(id: &str, name: &str, department: &str, access_level: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: TagKind::Qr,
            name: name.to_string(),
            department: department.to_string(),
            access_level: access_level.to_string(),
            valid_until: None,
            valid_days: None,
            issue_token: true,
            tag_type: None,
            content: None,
        }
    }

    fn until(mut self, year: i32, month: u32, day: u32) -> Self {
        self.valid_until = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single();
        self
    }

    fn days(mut self, days: i64) -> Self {
        self.valid_days = Some(days);
        self
    }

    /// Resolve the validity window against `now` and attach the token.
    ///
    /// Fails when a relative `valid_days` lands outside the representable
    /// date range.
    pub fn into_record(
        self,
        now: DateTime<Utc>,
        secure_token: Option<String>,
    ) -> Result<TagRecord> {
        let valid_until = match self.valid_until {
            Some(at) => at,
            None => expiry_after(now, self.valid_days.unwrap_or(DEFAULT_SEED_VALID_DAYS))?,
        };
        Ok(TagRecord {
            id: self.id,
            kind: self.kind,
            name: self.name,
            department: self.department,
            access_level: self.access_level,
            valid_until,
            secure_token,
            created_at: now,
            tag_type: self.tag_type,
            content: self.content,
        })
    }
}

/// Built-in demo registry
pub fn demo_records() -> Vec<SeedRecord> {
    vec![
        SeedRecord::qr("EMP001-SECURE-2024", "John Doe", "Engineering", "Level 3").until(2024, 12, 31),
        SeedRecord::qr("EMP002-SECURE-2024", "Jane Smith", "Security", "Level 5").until(2024, 12, 31),
        SeedRecord::qr("VISITOR-TEMP-001", "Mike Johnson", "Visitor", "Level 1").days(1),
        SeedRecord::qr("https://example.com/secure", "External Link", "Web Access", "Level 2")
            .until(2024, 12, 31),
        SeedRecord::qr("VERIFIED001", "John Employee", "Engineering", "Level 2").days(365),
        SeedRecord::qr("VERIFIED002", "Jane Manager", "Management", "Level 4").days(365),
        SeedRecord::qr("INVALID001", "Revoked Badge", "Unknown", "Level 0").until(2023, 1, 1),
        SeedRecord {
            kind: TagKind::Nfc,
            issue_token: false,
            tag_type: Some("NTAG213".to_string()),
            content: Some("Employee Access Card".to_string()),
            ..SeedRecord::qr("04:A3:B2:C1:D4:E5:F6", "Sarah Wilson", "HR", "Level 2")
        }
        .until(2024, 12, 31),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_codes_are_seeded() {
        let ids: Vec<_> = demo_records().into_iter().map(|s| s.id).collect();
        for code in DEMO_VERIFIED_CODES.iter().chain(DEMO_INVALID_CODES.iter()) {
            assert!(ids.iter().any(|id| id == code), "missing demo code {code}");
        }
    }

    #[test]
    fn test_relative_and_absolute_validity() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        let records: Vec<_> = demo_records()
            .into_iter()
            .map(|s| s.into_record(now, None).unwrap())
            .collect();

        let verified = records.iter().find(|r| r.id == "VERIFIED001").unwrap();
        assert_eq!(verified.valid_until, now + chrono::Duration::days(365));
        assert!(verified.is_valid_at(now));

        let invalid = records.iter().find(|r| r.id == "INVALID001").unwrap();
        assert!(!invalid.is_valid_at(now));

        let nfc = records.iter().find(|r| r.kind == TagKind::Nfc).unwrap();
        assert_eq!(nfc.tag_type.as_deref(), Some("NTAG213"));
    }

    #[test]
    fn test_seed_defaults() {
        let seed: SeedRecord = serde_json::from_str(
            r#"{"id":"LAB-1","name":"Ada","department":"Lab","access_level":"Level 1","valid_days":-1}"#,
        )
        .unwrap();
        assert_eq!(seed.kind, TagKind::Qr);
        assert!(seed.issue_token);
        assert_eq!(seed.valid_days, Some(-1));
    }

    #[test]
    fn test_out_of_range_valid_days_is_an_error() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        let seed: SeedRecord = serde_json::from_str(
            r#"{"id":"LAB-2","name":"Ada","department":"Lab","access_level":"Level 1","valid_days":9223372036854775807}"#,
        )
        .unwrap();
        assert_matches::assert_matches!(
            seed.into_record(now, None),
            Err(crate::SecureTagError::Invalid { .. })
        );
    }
}
