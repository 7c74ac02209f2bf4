//! Communication activity record.

use crate::model::member::MemberId;
use crate::model::{now_epoch_ms, require_member, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a communication record.
pub type CommunicationId = Uuid;

/// Daily messaging statistics for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationRecord {
    pub id: CommunicationId,
    pub member_id: MemberId,
    pub messages_per_day: u32,
    /// Whether the activity happened outside regular working hours.
    pub after_hours: bool,
    pub recorded_date: NaiveDate,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl CommunicationRecord {
    /// Creates a record with a generated id and the current timestamp.
    pub fn new(
        member_id: MemberId,
        messages_per_day: u32,
        after_hours: bool,
        recorded_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            messages_per_day,
            after_hours,
            recorded_date,
            created_at: now_epoch_ms(),
        }
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_member(&self.member_id)
    }
}
