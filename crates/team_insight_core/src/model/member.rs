//! Team member record.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - `user_id` is an opaque account identity and is never interpreted here.

use crate::model::{now_epoch_ms, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a team member.
pub type MemberId = Uuid;

/// One person tracked by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Display name shown in charts and tables.
    pub name: String,
    /// Optional link to an account identity owned by an auth provider.
    pub user_id: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Member {
    /// Creates a member with a generated id and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            user_id: None,
            created_at: now_epoch_ms(),
        }
    }

    /// Checks write-boundary invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.name, ModelValidationError::EmptyName)
    }
}

#[cfg(test)]
mod tests {
    use super::Member;
    use crate::model::ModelValidationError;

    #[test]
    fn new_member_has_identity_and_timestamp() {
        let member = Member::new("Ada");
        assert!(!member.id.is_nil());
        assert!(member.created_at > 0);
        assert_eq!(member.user_id, None);
        assert!(member.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let member = Member::new("   ");
        assert_eq!(member.validate(), Err(ModelValidationError::EmptyName));
    }
}
