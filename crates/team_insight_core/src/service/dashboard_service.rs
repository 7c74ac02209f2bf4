//! Dashboard query use-cases.
//!
//! # Responsibility
//! - Load one snapshot per query and run the pure aggregators over it.
//!
//! # Invariants
//! - A failed snapshot load fails the whole query; no partial health score
//!   is ever computed.
//! - Results are not cached here.

use crate::aggregate::{
    communication_per_member, dashboard_report, meeting_costs, record_counts,
    team_health_summary, workload_per_member, DashboardReport, DashboardSnapshot, MeetingCost,
    MemberCommunication, MemberWorkload, RecordCounts, TeamHealthSummary,
};
use crate::repo::snapshot::SnapshotSource;
use crate::repo::RepoResult;
use log::info;

/// Read-only dashboard service over a snapshot source.
pub struct DashboardService<S: SnapshotSource> {
    source: S,
}

impl<S: SnapshotSource> DashboardService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn snapshot(&self) -> RepoResult<DashboardSnapshot> {
        self.source.load_snapshot()
    }

    pub fn team_health(&self) -> RepoResult<TeamHealthSummary> {
        Ok(team_health_summary(&self.snapshot()?))
    }

    pub fn workload_per_member(&self) -> RepoResult<Vec<MemberWorkload>> {
        let snapshot = self.snapshot()?;
        Ok(workload_per_member(&snapshot.members, &snapshot.tasks))
    }

    pub fn meeting_costs(&self) -> RepoResult<Vec<MeetingCost>> {
        Ok(meeting_costs(&self.snapshot()?.meetings))
    }

    pub fn communication_per_member(&self) -> RepoResult<Vec<MemberCommunication>> {
        let snapshot = self.snapshot()?;
        Ok(communication_per_member(
            &snapshot.members,
            &snapshot.communications,
        ))
    }

    pub fn record_counts(&self) -> RepoResult<RecordCounts> {
        Ok(record_counts(&self.snapshot()?))
    }

    /// Computes every dashboard projection from a single snapshot.
    pub fn report(&self) -> RepoResult<DashboardReport> {
        let report = dashboard_report(&self.snapshot()?);
        info!(
            "event=dashboard_report module=service status=ok health={} status={} members={}",
            report.health.health,
            report.health.status_label,
            report.counts.members
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardService;
    use crate::aggregate::DashboardSnapshot;
    use crate::db::DbError;
    use crate::model::member::Member;
    use crate::model::task::{Task, Urgency};
    use crate::repo::snapshot::SnapshotSource;
    use crate::repo::{RepoError, RepoResult};

    struct FixedSource(DashboardSnapshot);

    impl SnapshotSource for FixedSource {
        fn load_snapshot(&self) -> RepoResult<DashboardSnapshot> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl SnapshotSource for FailingSource {
        fn load_snapshot(&self) -> RepoResult<DashboardSnapshot> {
            Err(RepoError::Db(DbError::Sqlite(
                rusqlite::Error::QueryReturnedNoRows,
            )))
        }
    }

    #[test]
    fn upstream_failure_aborts_every_query() {
        let service = DashboardService::new(FailingSource);

        assert!(matches!(service.team_health(), Err(RepoError::Db(_))));
        assert!(matches!(service.report(), Err(RepoError::Db(_))));
        assert!(matches!(service.workload_per_member(), Err(RepoError::Db(_))));
        assert!(matches!(service.meeting_costs(), Err(RepoError::Db(_))));
        assert!(matches!(
            service.communication_per_member(),
            Err(RepoError::Db(_))
        ));
        assert!(matches!(service.record_counts(), Err(RepoError::Db(_))));
    }

    #[test]
    fn queries_share_the_same_projections_as_the_report() {
        let ada = Member::new("Ada");
        let snapshot = DashboardSnapshot {
            members: vec![ada.clone()],
            tasks: vec![
                Task::new(ada.id, "ship", Urgency::High),
                Task::new(ada.id, "tidy", Urgency::Low),
            ],
            ..DashboardSnapshot::default()
        };
        let service = DashboardService::new(FixedSource(snapshot));

        let report = service.report().expect("report");
        let summary = service.team_health().expect("summary");

        assert_eq!(report.summary, summary);
        assert!((summary.workload_risk - 13.2).abs() < 1e-9);
        assert_eq!(
            service.workload_per_member().expect("workload"),
            report.workload
        );
        assert_eq!(service.record_counts().expect("counts").tasks, 2);
    }
}
