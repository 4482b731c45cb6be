//! Core registry, verification and audit types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Kind of tag presented for verification.
///
/// QR codes and NFC tags live in separate registry namespaces, so the same
/// identifier string may be registered under both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Printed or on-screen QR code
    Qr,
    /// NFC tag identified by its UID
    Nfc,
}

impl TagKind {
    /// Title-case label used in verification messages ("QR Code", "NFC Tag")
    pub fn label(self) -> &'static str {
        match self {
            Self::Qr => "QR Code",
            Self::Nfc => "NFC Tag",
        }
    }

    /// Sentence-case noun used in descriptions ("QR code", "NFC tag")
    pub fn noun(self) -> &'static str {
        match self {
            Self::Qr => "QR code",
            Self::Nfc => "NFC tag",
        }
    }

    /// Audit event type recorded for verifications of this kind
    pub fn audit_event(self) -> AuditEventKind {
        match self {
            Self::Qr => AuditEventKind::QrVerification,
            Self::Nfc => AuditEventKind::NfcVerification,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qr => f.write_str("qr"),
            Self::Nfc => f.write_str("nfc"),
        }
    }
}

/// A registered tag and the identity it grants access to.
///
/// Records are immutable once issued; there is no update or revoke path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Registry key, unique per [`TagKind`]
    pub id: String,
    /// Namespace the record lives in
    pub kind: TagKind,
    /// Owner name
    pub name: String,
    /// Owning department
    pub department: String,
    /// Access level label, e.g. "Level 3"
    pub access_level: String,
    /// End of the validity window (inclusive)
    pub valid_until: DateTime<Utc>,
    /// Opaque random token stored alongside the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token: Option<String>,
    /// When the record was issued
    pub created_at: DateTime<Utc>,
    /// NFC chip type, e.g. "NTAG213"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<String>,
    /// Free-form NFC payload description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TagRecord {
    /// A record is valid while `now` has not passed `valid_until`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.valid_until
    }
}

/// Outcome of looking up a tag at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Tag is registered and inside its validity window
    Verified {
        /// Stored record, unchanged
        record: TagRecord,
    },
    /// Tag is registered but its validity window has closed
    Expired {
        /// The record's `valid_until`
        expired_at: DateTime<Utc>,
    },
    /// Tag is not registered
    Unknown,
}

/// Per-request verification result. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Kind of tag that was checked
    pub kind: TagKind,
    /// Identifier as presented by the client
    pub identifier: String,
    /// Lookup outcome
    pub verdict: Verdict,
    /// Time the check was evaluated at
    pub checked_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Whether the tag was accepted
    pub fn verified(&self) -> bool {
        matches!(self.verdict, Verdict::Verified { .. })
    }

    /// Short human-readable verdict
    pub fn message(&self) -> String {
        let label = self.kind.label();
        match self.verdict {
            Verdict::Verified { .. } => format!("{label} Verified Successfully"),
            Verdict::Expired { .. } => format!("Expired {label}"),
            Verdict::Unknown => format!("Unknown {label}"),
        }
    }

    /// Longer explanation for failed verifications
    pub fn description(&self) -> Option<String> {
        let noun = self.kind.noun();
        match &self.verdict {
            Verdict::Verified { .. } => None,
            Verdict::Expired { expired_at } => Some(format!(
                "This {noun} expired on {}",
                expired_at.format("%Y-%m-%d")
            )),
            Verdict::Unknown => Some(format!("This {noun} is not registered in our system")),
        }
    }

    /// Stored record, present only for verified tags
    pub fn record(&self) -> Option<&TagRecord> {
        match &self.verdict {
            Verdict::Verified { record } => Some(record),
            _ => None,
        }
    }

    /// Expiry timestamp, present only for expired tags
    pub fn expired_at(&self) -> Option<DateTime<Utc>> {
        match self.verdict {
            Verdict::Expired { expired_at } => Some(expired_at),
            _ => None,
        }
    }
}

/// Audit event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventKind {
    /// A QR code verification attempt
    QrVerification,
    /// An NFC tag verification attempt
    NfcVerification,
}

impl AuditEventKind {
    /// Wire name, e.g. `QR_VERIFICATION`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QrVerification => "QR_VERIFICATION",
            Self::NfcVerification => "NFC_VERIFICATION",
        }
    }
}

impl FromStr for AuditEventKind {
    type Err = crate::SecureTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QR_VERIFICATION" => Ok(Self::QrVerification),
            "NFC_VERIFICATION" => Ok(Self::NfcVerification),
            other => Err(crate::SecureTagError::invalid(format!(
                "unknown audit event type: {other}"
            ))),
        }
    }
}

/// Verdict summary stored in an audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOutcome {
    /// Whether the tag was accepted
    pub verified: bool,
    /// Verdict message returned to the client
    pub message: String,
}

/// One recorded verification attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// When the attempt happened
    pub timestamp: DateTime<Utc>,
    /// Event type
    #[serde(rename = "type")]
    pub event: AuditEventKind,
    /// Identifier presented by the client
    pub tag_id: String,
    /// Verdict summary
    pub result: AuditOutcome,
    /// Client address, when the transport exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
}

impl AuditEntry {
    /// Build the audit entry describing a verification result
    pub fn from_result(result: &VerificationResult, ip: Option<IpAddr>) -> Self {
        Self {
            timestamp: result.checked_at,
            event: result.kind.audit_event(),
            tag_id: result.identifier.clone(),
            result: AuditOutcome {
                verified: result.verified(),
                message: result.message(),
            },
            ip,
        }
    }
}
