//! Team-health summary, record counts and the combined dashboard report.

use crate::aggregate::views::{
    communication_per_member, meeting_costs, workload_per_member, MeetingCost,
    MemberCommunication, MemberWorkload,
};
use crate::aggregate::DashboardSnapshot;
use crate::metrics::health::{team_health, HealthColor, HealthStatus, RiskBreakdown, RiskLevel};
use crate::metrics::rounding::round_display;
use crate::metrics::{
    after_hours_percentage, average_messages_per_day, communication_risk, meeting_risk,
    total_meeting_cost, total_workload, workload_risk,
};
use serde::{Deserialize, Serialize};

/// Team-wide metrics at full precision.
///
/// Totals include every record in the snapshot, whether or not its member
/// reference resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHealthSummary {
    pub health: f64,
    pub workload_risk: f64,
    pub meeting_risk: f64,
    pub communication_risk: f64,
    pub member_count: usize,
    pub total_workload: u64,
    pub total_meeting_cost: u64,
    pub avg_messages: f64,
    pub after_hours_percentage: f64,
}

impl TeamHealthSummary {
    pub fn risks(&self) -> RiskBreakdown {
        RiskBreakdown {
            workload_risk: self.workload_risk,
            meeting_risk: self.meeting_risk,
            communication_risk: self.communication_risk,
        }
    }

    pub fn status(&self) -> HealthStatus {
        HealthStatus::from_health(self.health)
    }

    /// Rounded projection for rendering.
    ///
    /// Status, color and risk levels are classified on full-precision
    /// values; only the numbers are rounded.
    pub fn to_display(&self) -> TeamHealthDisplay {
        let status = self.status();
        TeamHealthDisplay {
            health: round_display(self.health),
            status,
            status_label: status.label().to_string(),
            status_description: status.description().to_string(),
            color: status.color(),
            workload_risk: round_display(self.workload_risk),
            workload_level: RiskLevel::from_risk(self.workload_risk),
            meeting_risk: round_display(self.meeting_risk),
            meeting_level: RiskLevel::from_risk(self.meeting_risk),
            communication_risk: round_display(self.communication_risk),
            communication_level: RiskLevel::from_risk(self.communication_risk),
            member_count: self.member_count,
            total_workload: self.total_workload,
            total_meeting_cost: self.total_meeting_cost,
            avg_messages: round_display(self.avg_messages),
            after_hours_percentage: round_display(self.after_hours_percentage),
        }
    }
}

/// Display-ready team health with integer values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamHealthDisplay {
    pub health: i64,
    pub status: HealthStatus,
    pub status_label: String,
    pub status_description: String,
    pub color: HealthColor,
    pub workload_risk: i64,
    pub workload_level: RiskLevel,
    pub meeting_risk: i64,
    pub meeting_level: RiskLevel,
    pub communication_risk: i64,
    pub communication_level: RiskLevel,
    pub member_count: usize,
    pub total_workload: u64,
    pub total_meeting_cost: u64,
    pub avg_messages: i64,
    pub after_hours_percentage: i64,
}

/// Number of stored records per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub members: usize,
    pub tasks: usize,
    pub meetings: usize,
    pub communication_records: usize,
}

/// Everything the dashboard page renders, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub counts: RecordCounts,
    pub summary: TeamHealthSummary,
    pub health: TeamHealthDisplay,
    pub workload: Vec<MemberWorkload>,
    pub meeting_costs: Vec<MeetingCost>,
    pub communication: Vec<MemberCommunication>,
}

/// Computes team-wide totals, the three risks and the composite health.
pub fn team_health_summary(snapshot: &DashboardSnapshot) -> TeamHealthSummary {
    let member_count = snapshot.members.len();
    let total_workload = total_workload(&snapshot.tasks);
    let total_meeting_cost = total_meeting_cost(&snapshot.meetings);
    let avg_messages = average_messages_per_day(&snapshot.communications);
    let after_hours_percentage = after_hours_percentage(&snapshot.communications);

    let risks = RiskBreakdown {
        workload_risk: workload_risk(total_workload, member_count),
        meeting_risk: meeting_risk(total_meeting_cost, member_count),
        communication_risk: communication_risk(avg_messages, after_hours_percentage),
    };

    TeamHealthSummary {
        health: team_health(&risks),
        workload_risk: risks.workload_risk,
        meeting_risk: risks.meeting_risk,
        communication_risk: risks.communication_risk,
        member_count,
        total_workload,
        total_meeting_cost,
        avg_messages,
        after_hours_percentage,
    }
}

pub fn record_counts(snapshot: &DashboardSnapshot) -> RecordCounts {
    RecordCounts {
        members: snapshot.members.len(),
        tasks: snapshot.tasks.len(),
        meetings: snapshot.meetings.len(),
        communication_records: snapshot.communications.len(),
    }
}

pub fn dashboard_report(snapshot: &DashboardSnapshot) -> DashboardReport {
    let summary = team_health_summary(snapshot);
    DashboardReport {
        counts: record_counts(snapshot),
        health: summary.to_display(),
        summary,
        workload: workload_per_member(&snapshot.members, &snapshot.tasks),
        meeting_costs: meeting_costs(&snapshot.meetings),
        communication: communication_per_member(&snapshot.members, &snapshot.communications),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::communication::CommunicationRecord;
    use crate::model::meeting::Meeting;
    use crate::model::member::Member;
    use crate::model::task::{Task, Urgency};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date")
    }

    #[test]
    fn empty_snapshot_is_fully_healthy() {
        let snapshot = DashboardSnapshot::default();
        let report = dashboard_report(&snapshot);

        assert_eq!(report.summary.health, 100.0);
        assert_eq!(report.summary.workload_risk, 0.0);
        assert_eq!(report.summary.meeting_risk, 0.0);
        assert_eq!(report.summary.communication_risk, 0.0);
        assert_eq!(report.health.health, 100);
        assert_eq!(report.health.status, HealthStatus::Healthy);
        assert!(report.workload.is_empty());
        assert!(report.meeting_costs.is_empty());
        assert!(report.communication.is_empty());
        assert_eq!(report.counts, RecordCounts::default());
    }

    #[test]
    fn summary_combines_all_three_categories() {
        let ada = Member::new("Ada");
        let grace = Member::new("Grace");
        let linus = Member::new("Linus");
        let snapshot = DashboardSnapshot {
            members: vec![ada.clone(), grace.clone(), linus.clone()],
            tasks: vec![
                Task::new(ada.id, "release", Urgency::High),
                Task::new(grace.id, "review", Urgency::Medium),
                Task::new(linus.id, "docs", Urgency::Low),
            ],
            meetings: vec![Meeting::new("planning", 30, 5, date())],
            communications: vec![
                CommunicationRecord::new(ada.id, 150, true, date()),
                CommunicationRecord::new(grace.id, 50, false, date()),
            ],
        };

        let summary = team_health_summary(&snapshot);

        assert_eq!(summary.member_count, 3);
        assert_eq!(summary.total_workload, 6);
        assert_eq!(summary.total_meeting_cost, 150);
        assert!((summary.workload_risk - 6.6).abs() < 1e-9);
        assert!((summary.meeting_risk - 16.5).abs() < 1e-9);
        assert!((summary.avg_messages - 100.0).abs() < 1e-9);
        assert!((summary.after_hours_percentage - 50.0).abs() < 1e-9);
        assert!((summary.communication_risk - 24.75).abs() < 1e-9);
        assert!((summary.health - 52.15).abs() < 1e-9);

        let display = summary.to_display();
        assert_eq!(display.health, 52);
        assert_eq!(display.status_label, "At Risk");
        assert_eq!(display.color, HealthColor::Yellow);
        assert_eq!(display.workload_risk, 7);
        assert_eq!(display.workload_level, RiskLevel::Low);
        assert_eq!(display.meeting_risk, 17);
        assert_eq!(display.meeting_level, RiskLevel::Medium);
        assert_eq!(display.communication_risk, 25);
        assert_eq!(display.communication_level, RiskLevel::High);
        assert_eq!(display.avg_messages, 100);
    }

    #[test]
    fn team_totals_include_records_with_unknown_members() {
        let ada = Member::new("Ada");
        let ghost = uuid::Uuid::new_v4();
        let snapshot = DashboardSnapshot {
            members: vec![ada.clone()],
            tasks: vec![
                Task::new(ada.id, "kept", Urgency::Low),
                Task::new(ghost, "orphan", Urgency::High),
            ],
            meetings: Vec::new(),
            communications: Vec::new(),
        };

        let report = dashboard_report(&snapshot);

        assert_eq!(report.summary.total_workload, 4);
        assert_eq!(report.workload.len(), 1);
        assert_eq!(report.workload[0].total_workload, 1);
    }

    #[test]
    fn repeated_computation_is_identical() {
        let ada = Member::new("Ada");
        let snapshot = DashboardSnapshot {
            members: vec![ada.clone()],
            tasks: vec![Task::new(ada.id, "a", Urgency::Medium)],
            meetings: vec![Meeting::new("sync", 45, 3, date())],
            communications: vec![CommunicationRecord::new(ada.id, 33, true, date())],
        };

        assert_eq!(dashboard_report(&snapshot), dashboard_report(&snapshot));
    }
}
