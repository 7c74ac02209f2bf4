//! Task record and urgency levels.
//!
//! # Invariants
//! - Every task belongs to exactly one member.
//! - Urgency weights are fixed: Low=1, Medium=2, High=3.

use crate::model::member::MemberId;
use crate::model::{now_epoch_ms, require_member, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Urgency level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Workload units contributed by one task of this urgency.
    pub fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Stable string form used in storage and at the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses the stable string form. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Work item assigned to a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub member_id: MemberId,
    pub title: String,
    pub urgency: Urgency,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated id and the current timestamp.
    pub fn new(member_id: MemberId, title: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            title: title.into(),
            urgency,
            created_at: now_epoch_ms(),
        }
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_member(&self.member_id)?;
        require_text(&self.title, ModelValidationError::EmptyTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, Urgency};
    use crate::model::ModelValidationError;
    use uuid::Uuid;

    #[test]
    fn weights_follow_fixed_mapping() {
        assert_eq!(Urgency::Low.weight(), 1);
        assert_eq!(Urgency::Medium.weight(), 2);
        assert_eq!(Urgency::High.weight(), 3);
    }

    #[test]
    fn parse_accepts_any_case_and_rejects_unknown() {
        assert_eq!(Urgency::parse("high"), Some(Urgency::High));
        assert_eq!(Urgency::parse(" Medium "), Some(Urgency::Medium));
        assert_eq!(Urgency::parse("LOW"), Some(Urgency::Low));
        assert_eq!(Urgency::parse("urgent"), None);
    }

    #[test]
    fn task_without_member_or_title_is_rejected() {
        let orphan = Task::new(Uuid::nil(), "ship", Urgency::High);
        assert_eq!(orphan.validate(), Err(ModelValidationError::NilMemberId));

        let untitled = Task::new(Uuid::new_v4(), "  ", Urgency::Low);
        assert_eq!(untitled.validate(), Err(ModelValidationError::EmptyTitle));
    }
}
