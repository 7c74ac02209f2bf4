//! Chart- and table-ready projections over raw records.
//!
//! # Responsibility
//! - Group tasks and communication records by member.
//! - Project meetings into cost rows.
//! - Combine calculator outputs into the team-health summary and report.
//!
//! # Invariants
//! - Records referencing an unknown member are skipped from per-member
//!   views, never reported as errors.
//! - Empty input yields empty output lists.
//! - Output rows keep first-appearance order of their group in the input.

use crate::model::communication::CommunicationRecord;
use crate::model::meeting::Meeting;
use crate::model::member::Member;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};

pub mod summary;
pub mod views;

pub use summary::{
    dashboard_report, record_counts, team_health_summary, DashboardReport, RecordCounts,
    TeamHealthDisplay, TeamHealthSummary,
};
pub use views::{
    communication_per_member, meeting_costs, workload_per_member, MeetingCost,
    MemberCommunication, MemberWorkload,
};

/// All records the dashboard is computed from, read together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub meetings: Vec<Meeting>,
    pub communications: Vec<CommunicationRecord>,
}
