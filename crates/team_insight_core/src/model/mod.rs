//! Domain records for team collaboration analytics.
//!
//! # Responsibility
//! - Define the canonical record shapes consumed by metrics and aggregators.
//! - Own write-boundary validation for every record kind.
//!
//! # Invariants
//! - Records are immutable once stored; mutation is delete + recreate.
//! - Every record is identified by a stable UUID that is never reused.
//! - Validation runs before persistence, never inside the scoring engine.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod communication;
pub mod meeting;
pub mod member;
pub mod task;

/// Validation failures for records entering the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Member name is empty after trimming.
    EmptyName,
    /// Task or meeting title is empty after trimming.
    EmptyTitle,
    /// Meeting duration must be at least one minute.
    InvalidDuration(u32),
    /// Meeting must have at least one participant.
    InvalidParticipants(u32),
    /// Task or communication record does not reference a member.
    NilMemberId,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidDuration(value) => {
                write!(f, "duration must be at least 1 minute, got {value}")
            }
            Self::InvalidParticipants(value) => {
                write!(f, "participants must be at least 1, got {value}")
            }
            Self::NilMemberId => write!(f, "member_id must not be the nil uuid"),
        }
    }
}

impl Error for ModelValidationError {}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reports a time before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

pub(crate) fn require_member(member_id: &Uuid) -> Result<(), ModelValidationError> {
    if member_id.is_nil() {
        return Err(ModelValidationError::NilMemberId);
    }
    Ok(())
}

pub(crate) fn require_text(
    value: &str,
    error: ModelValidationError,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}
