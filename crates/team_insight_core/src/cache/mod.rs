//! Cache invalidation contract for read/aggregation results.
//!
//! # Responsibility
//! - Map every entity kind to the query keys its writes make stale.
//! - Accumulate stale keys for callers that cache query results.
//!
//! # Invariants
//! - The dependency map is static and total over [`EntityKind`].
//! - Every write invalidates [`QueryKey::TeamHealth`].
//! - Core never caches; callers own cached values and consume stale keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of stored record a write touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Member,
    Task,
    Meeting,
    Communication,
}

/// Identifier of one cacheable read or aggregation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKey {
    Members,
    Tasks,
    Meetings,
    Communication,
    Workload,
    MeetingCosts,
    CommunicationSummary,
    TeamHealth,
}

impl QueryKey {
    /// Stable string id handed to UI callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Tasks => "tasks",
            Self::Meetings => "meetings",
            Self::Communication => "communication",
            Self::Workload => "workload",
            Self::MeetingCosts => "meeting_costs",
            Self::CommunicationSummary => "communication_summary",
            Self::TeamHealth => "team_health",
        }
    }
}

const MEMBER_DEPENDENTS: &[QueryKey] = &[
    QueryKey::Members,
    // Deleting a member cascades to tasks and communication records, and
    // both listings carry member names.
    QueryKey::Tasks,
    QueryKey::Communication,
    QueryKey::Workload,
    QueryKey::CommunicationSummary,
    QueryKey::TeamHealth,
];
const TASK_DEPENDENTS: &[QueryKey] = &[QueryKey::Tasks, QueryKey::Workload, QueryKey::TeamHealth];
const MEETING_DEPENDENTS: &[QueryKey] = &[
    QueryKey::Meetings,
    QueryKey::MeetingCosts,
    QueryKey::TeamHealth,
];
const COMMUNICATION_DEPENDENTS: &[QueryKey] = &[
    QueryKey::Communication,
    QueryKey::CommunicationSummary,
    QueryKey::TeamHealth,
];

/// Query keys that become stale after a create or delete of `kind`.
pub fn dependent_keys(kind: EntityKind) -> &'static [QueryKey] {
    match kind {
        EntityKind::Member => MEMBER_DEPENDENTS,
        EntityKind::Task => TASK_DEPENDENTS,
        EntityKind::Meeting => MEETING_DEPENDENTS,
        EntityKind::Communication => COMMUNICATION_DEPENDENTS,
    }
}

/// Accumulated set of stale query keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaleSet {
    keys: BTreeSet<QueryKey>,
}

impl StaleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every key depending on `kind` as stale.
    pub fn mark_changed(&mut self, kind: EntityKind) {
        self.keys.extend(dependent_keys(kind).iter().copied());
    }

    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns stale keys in stable order and clears the set.
    pub fn take(&mut self) -> Vec<QueryKey> {
        std::mem::take(&mut self.keys).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{dependent_keys, EntityKind, QueryKey, StaleSet};

    const ALL_KINDS: [EntityKind; 4] = [
        EntityKind::Member,
        EntityKind::Task,
        EntityKind::Meeting,
        EntityKind::Communication,
    ];

    #[test]
    fn every_write_invalidates_team_health() {
        for kind in ALL_KINDS {
            assert!(dependent_keys(kind).contains(&QueryKey::TeamHealth), "{kind:?}");
        }
    }

    #[test]
    fn task_writes_do_not_touch_meeting_views() {
        let keys = dependent_keys(EntityKind::Task);
        assert!(keys.contains(&QueryKey::Workload));
        assert!(!keys.contains(&QueryKey::Meetings));
        assert!(!keys.contains(&QueryKey::MeetingCosts));
    }

    #[test]
    fn member_writes_invalidate_member_scoped_views() {
        let keys = dependent_keys(EntityKind::Member);
        for key in [
            QueryKey::Members,
            QueryKey::Tasks,
            QueryKey::Communication,
            QueryKey::Workload,
            QueryKey::CommunicationSummary,
        ] {
            assert!(keys.contains(&key), "{key:?}");
        }
        assert!(!keys.contains(&QueryKey::MeetingCosts));
    }

    #[test]
    fn stale_set_accumulates_and_drains() {
        let mut stale = StaleSet::new();
        assert!(stale.is_empty());

        stale.mark_changed(EntityKind::Meeting);
        stale.mark_changed(EntityKind::Task);
        assert!(stale.is_stale(QueryKey::MeetingCosts));
        assert!(stale.is_stale(QueryKey::Workload));
        assert!(!stale.is_stale(QueryKey::Members));

        let drained = stale.take();
        assert_eq!(
            drained,
            vec![
                QueryKey::Tasks,
                QueryKey::Meetings,
                QueryKey::Workload,
                QueryKey::MeetingCosts,
                QueryKey::TeamHealth,
            ]
        );
        assert!(stale.is_empty());
    }
}
