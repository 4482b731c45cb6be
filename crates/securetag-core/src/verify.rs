//! Tag verification
//!
//! Verification is a registry lookup followed by a validity-window check.
//! Unknown and expired tags produce a normal [`VerificationResult`] with
//! `verified() == false`; only a missing identifier is an error.

use crate::types::{TagKind, TagRecord, VerificationResult, Verdict};
use crate::{Result, SecureTagError};
use chrono::{DateTime, Utc};

/// Reject absent or blank identifiers.
///
/// Non-blank identifiers are returned exactly as presented; registry keys are
/// matched byte for byte.
pub fn require_identifier(kind: TagKind, identifier: Option<&str>) -> Result<&str> {
    match identifier {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(missing_identifier(kind)),
    }
}

/// Error for a request that carries no usable identifier of `kind`
pub fn missing_identifier(kind: TagKind) -> SecureTagError {
    let field = match kind {
        TagKind::Qr => "QR code data",
        TagKind::Nfc => "NFC tag ID",
    };
    SecureTagError::invalid(format!("{field} is required"))
}

/// Decide the verdict for a looked-up record at time `now`
pub fn evaluate(
    kind: TagKind,
    identifier: &str,
    record: Option<TagRecord>,
    now: DateTime<Utc>,
) -> VerificationResult {
    let verdict = match record {
        None => Verdict::Unknown,
        Some(record) if !record.is_valid_at(now) => Verdict::Expired {
            expired_at: record.valid_until,
        },
        Some(record) => Verdict::Verified { record },
    };

    VerificationResult {
        kind,
        identifier: identifier.to_string(),
        verdict,
        checked_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn record(valid_until: DateTime<Utc>) -> TagRecord {
        TagRecord {
            id: "VERIFIED001".to_string(),
            kind: TagKind::Qr,
            name: "John Employee".to_string(),
            department: "Engineering".to_string(),
            access_level: "Level 2".to_string(),
            valid_until,
            secure_token: Some("ab".repeat(32)),
            created_at: now() - Duration::days(10),
            tag_type: None,
            content: None,
        }
    }

    #[test]
    fn test_blank_identifier_is_invalid_request() {
        assert_matches!(
            require_identifier(TagKind::Qr, None),
            Err(SecureTagError::Invalid { message }) if message == "QR code data is required"
        );
        assert_matches!(
            require_identifier(TagKind::Nfc, Some("   ")),
            Err(SecureTagError::Invalid { message }) if message == "NFC tag ID is required"
        );
        assert_eq!(require_identifier(TagKind::Qr, Some(" A ")).unwrap(), " A ");
    }

    #[test]
    fn test_unknown_tag() {
        let result = evaluate(TagKind::Qr, "NOPE", None, now());
        assert!(!result.verified());
        assert_eq!(result.verdict, Verdict::Unknown);
        assert_eq!(result.message(), "Unknown QR Code");
    }

    #[test]
    fn test_expired_tag_reports_expiry() {
        let end = now() - Duration::seconds(1);
        let result = evaluate(TagKind::Qr, "VERIFIED001", Some(record(end)), now());
        assert!(!result.verified());
        assert_eq!(result.expired_at(), Some(end));
        assert!(result.description().unwrap().contains("2026-10-16"));
    }

    #[test]
    fn test_valid_tag_echoes_record_unchanged() {
        let stored = record(now());
        let result = evaluate(TagKind::Qr, "VERIFIED001", Some(stored.clone()), now());
        assert!(result.verified());
        assert_eq!(result.record(), Some(&stored));
        assert_eq!(result.checked_at, now());
        assert_eq!(result.message(), "QR Code Verified Successfully");
    }
}
