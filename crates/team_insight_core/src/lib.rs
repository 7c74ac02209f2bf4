//! Core domain logic for Team Insight.
//! This crate is the single source of truth for metric formulas, health
//! thresholds and record invariants.

pub mod access;
pub mod aggregate;
pub mod cache;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod service;

pub use access::{parse_role, visible_sections, AppRole, RoleParseError, Section};
pub use aggregate::{
    DashboardReport, DashboardSnapshot, MeetingCost, MemberCommunication, MemberWorkload,
    RecordCounts, TeamHealthDisplay, TeamHealthSummary,
};
pub use cache::{dependent_keys, EntityKind, QueryKey, StaleSet};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use metrics::health::{HealthColor, HealthStatus, RiskBreakdown, RiskLevel};
pub use model::communication::{CommunicationId, CommunicationRecord};
pub use model::meeting::{Meeting, MeetingId};
pub use model::member::{Member, MemberId};
pub use model::task::{Task, TaskId, Urgency};
pub use model::ModelValidationError;
pub use repo::communication_repo::{CommunicationRepository, CommunicationWithMember};
pub use repo::meeting_repo::MeetingRepository;
pub use repo::member_repo::MemberRepository;
pub use repo::snapshot::SnapshotSource;
pub use repo::task_repo::{TaskRepository, TaskWithMember};
pub use repo::{RepoError, RepoResult, SqliteTeamRepository};
pub use service::dashboard_service::DashboardService;
pub use service::team_service::{
    NewCommunication, NewMeeting, NewMember, NewTask, TeamDataService, TeamRepository,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
