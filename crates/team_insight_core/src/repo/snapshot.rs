//! All-or-nothing loading of the dashboard snapshot.
//!
//! # Invariants
//! - The four collections are read inside one read transaction.
//! - Any failing read aborts the load; no partial snapshot is returned.

use crate::aggregate::DashboardSnapshot;
use crate::repo::communication_repo::list_communication_on;
use crate::repo::meeting_repo::list_meetings_on;
use crate::repo::member_repo::list_members_on;
use crate::repo::task_repo::list_tasks_on;
use crate::repo::{RepoResult, SqliteTeamRepository};
use log::{debug, error};
use std::time::Instant;

/// Source of the records the dashboard is computed from.
pub trait SnapshotSource {
    fn load_snapshot(&self) -> RepoResult<DashboardSnapshot>;
}

impl SnapshotSource for SqliteTeamRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<DashboardSnapshot> {
        let started_at = Instant::now();
        let result = read_snapshot(self);
        match &result {
            Ok(snapshot) => debug!(
                "event=snapshot_load module=repo status=ok duration_ms={} members={} tasks={} meetings={} communication={}",
                started_at.elapsed().as_millis(),
                snapshot.members.len(),
                snapshot.tasks.len(),
                snapshot.meetings.len(),
                snapshot.communications.len()
            ),
            Err(err) => error!(
                "event=snapshot_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn read_snapshot(repo: &SqliteTeamRepository<'_>) -> RepoResult<DashboardSnapshot> {
    let tx = repo.conn.unchecked_transaction()?;
    let snapshot = DashboardSnapshot {
        members: list_members_on(&tx)?,
        tasks: list_tasks_on(&tx)?,
        meetings: list_meetings_on(&tx)?,
        communications: list_communication_on(&tx)?,
    };
    tx.commit()?;
    Ok(snapshot)
}
