//! Admin issuing of new QR tag records

use crate::types::{TagKind, TagRecord};
use crate::{Result, SecureTagError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Random bytes in the identifier suffix (16 hex characters)
pub const IDENTIFIER_SUFFIX_BYTES: usize = 8;

/// Random bytes in a secure token (64 hex characters)
pub const SECURE_TOKEN_BYTES: usize = 32;

/// Identifier generation attempts before giving up on collisions
pub const MAX_ISSUE_ATTEMPTS: usize = 8;

/// Upper bound on any configured `max_valid_days` (about 100 years)
pub const VALID_DAYS_LIMIT: u32 = 36_525;

const MISSING_FIELDS: &str = "Missing required fields: name, department, accessLevel";

/// Bounds applied to issue requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePolicy {
    /// Validity used when the request omits `validDays`
    pub default_valid_days: u32,
    /// Largest accepted `validDays`
    pub max_valid_days: u32,
}

impl Default for IssuePolicy {
    fn default() -> Self {
        Self {
            default_valid_days: 30,
            max_valid_days: 3650,
        }
    }
}

/// Request to mint a new QR tag. Fields are optional so that absent values
/// surface as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    /// Owner name
    pub name: Option<String>,
    /// Owning department; also the identifier prefix
    pub department: Option<String>,
    /// Access level label
    pub access_level: Option<String>,
    /// Days the tag stays valid
    pub valid_days: Option<u32>,
}

/// Issue request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIssue {
    /// Owner name
    pub name: String,
    /// Owning department
    pub department: String,
    /// Access level label
    pub access_level: String,
    /// Days the tag stays valid
    pub valid_days: u32,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

impl IssueRequest {
    /// Check required fields and validity bounds
    pub fn validate(&self, policy: &IssuePolicy) -> Result<ValidatedIssue> {
        let (Some(name), Some(department), Some(access_level)) = (
            present(&self.name),
            present(&self.department),
            present(&self.access_level),
        ) else {
            return Err(SecureTagError::invalid(MISSING_FIELDS));
        };

        let valid_days = self.valid_days.unwrap_or(policy.default_valid_days);
        if valid_days > policy.max_valid_days {
            return Err(SecureTagError::invalid(format!(
                "validDays must not exceed {}",
                policy.max_valid_days
            )));
        }

        Ok(ValidatedIssue {
            name: name.to_string(),
            department: department.to_string(),
            access_level: access_level.to_string(),
            valid_days,
        })
    }
}

/// `{DEPARTMENT}-{RANDOM HEX}`, both parts uppercased
pub fn tag_identifier(department: &str, suffix: &[u8]) -> String {
    format!(
        "{}-{}",
        department.to_uppercase(),
        hex::encode_upper(suffix)
    )
}

/// `now` shifted by `days`, or an invalid-input error when the result is
/// outside the representable date range
pub fn expiry_after(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| SecureTagError::invalid(format!("validity of {days} days is out of range")))
}

/// Build the record for a validated request
pub fn mint(
    issue: &ValidatedIssue,
    id: String,
    secure_token: String,
    now: DateTime<Utc>,
) -> Result<TagRecord> {
    Ok(TagRecord {
        id,
        kind: TagKind::Qr,
        name: issue.name.clone(),
        department: issue.department.clone(),
        access_level: issue.access_level.clone(),
        valid_until: expiry_after(now, i64::from(issue.valid_days))?,
        secure_token: Some(secure_token),
        created_at: now,
        tag_type: None,
        content: None,
    })
}
