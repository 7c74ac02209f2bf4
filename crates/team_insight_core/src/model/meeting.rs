//! Meeting record.
//!
//! # Invariants
//! - `duration >= 1` (minutes) and `participants >= 1`.
//! - Cost is derived, never stored: `duration * participants`.

use crate::model::{now_epoch_ms, require_text, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a meeting.
pub type MeetingId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    /// Length in minutes.
    pub duration: u32,
    pub participants: u32,
    pub meeting_date: NaiveDate,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Meeting {
    /// Creates a meeting with a generated id and the current timestamp.
    pub fn new(
        title: impl Into<String>,
        duration: u32,
        participants: u32,
        meeting_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            duration,
            participants,
            meeting_date,
            created_at: now_epoch_ms(),
        }
    }

    /// Person-minutes spent in this meeting.
    pub fn cost(&self) -> u64 {
        crate::metrics::meeting_cost(self.duration, self.participants)
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.title, ModelValidationError::EmptyTitle)?;
        if self.duration < 1 {
            return Err(ModelValidationError::InvalidDuration(self.duration));
        }
        if self.participants < 1 {
            return Err(ModelValidationError::InvalidParticipants(self.participants));
        }
        Ok(())
    }
}
