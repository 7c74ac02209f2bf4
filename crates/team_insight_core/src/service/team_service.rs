//! Record management use-cases.
//!
//! # Responsibility
//! - Build records from caller input (trim text, assign ids, default dates).
//! - Delegate persistence to repository implementations.
//! - Track which cached query results each successful write made stale.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Failed writes never mark anything stale.

use crate::cache::{EntityKind, QueryKey, StaleSet};
use crate::model::communication::{CommunicationId, CommunicationRecord};
use crate::model::meeting::{Meeting, MeetingId};
use crate::model::member::{Member, MemberId};
use crate::model::task::{Task, TaskId, Urgency};
use crate::repo::communication_repo::{CommunicationRepository, CommunicationWithMember};
use crate::repo::meeting_repo::MeetingRepository;
use crate::repo::member_repo::MemberRepository;
use crate::repo::task_repo::{TaskRepository, TaskWithMember};
use crate::repo::RepoResult;
use chrono::{NaiveDate, Utc};
use log::{info, warn};

/// Input for adding a member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewMember {
    pub name: String,
    pub user_id: Option<String>,
}

/// Input for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub member_id: MemberId,
    pub title: String,
    pub urgency: Urgency,
}

/// Input for adding a meeting. `meeting_date` defaults to today (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    pub title: String,
    pub duration: u32,
    pub participants: u32,
    pub meeting_date: Option<NaiveDate>,
}

/// Input for adding communication stats. `recorded_date` defaults to today
/// (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommunication {
    pub member_id: MemberId,
    pub messages_per_day: u32,
    pub after_hours: bool,
    pub recorded_date: Option<NaiveDate>,
}

/// Trait bundle for stores that hold every record kind.
pub trait TeamRepository:
    MemberRepository + TaskRepository + MeetingRepository + CommunicationRepository
{
}

impl<T> TeamRepository for T where
    T: MemberRepository + TaskRepository + MeetingRepository + CommunicationRepository
{
}

/// Use-case service for creating, listing and deleting team records.
pub struct TeamDataService<R: TeamRepository> {
    repo: R,
    stale: StaleSet,
}

impl<R: TeamRepository> TeamDataService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            stale: StaleSet::new(),
        }
    }

    pub fn add_member(&mut self, input: NewMember) -> RepoResult<Member> {
        let mut member = Member::new(input.name.trim());
        member.user_id = input
            .user_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let result = self.repo.create_member(&member);
        self.finish_write(EntityKind::Member, "create", result.map(|_| member))
    }

    pub fn add_task(&mut self, input: NewTask) -> RepoResult<Task> {
        let task = Task::new(input.member_id, input.title.trim(), input.urgency);
        let result = self.repo.create_task(&task);
        self.finish_write(EntityKind::Task, "create", result.map(|_| task))
    }

    pub fn add_meeting(&mut self, input: NewMeeting) -> RepoResult<Meeting> {
        let meeting = Meeting::new(
            input.title.trim(),
            input.duration,
            input.participants,
            input.meeting_date.unwrap_or_else(today),
        );
        let result = self.repo.create_meeting(&meeting);
        self.finish_write(EntityKind::Meeting, "create", result.map(|_| meeting))
    }

    pub fn add_communication(
        &mut self,
        input: NewCommunication,
    ) -> RepoResult<CommunicationRecord> {
        let record = CommunicationRecord::new(
            input.member_id,
            input.messages_per_day,
            input.after_hours,
            input.recorded_date.unwrap_or_else(today),
        );
        let result = self.repo.create_communication(&record);
        self.finish_write(EntityKind::Communication, "create", result.map(|_| record))
    }

    /// Deletes a member; their tasks and communication records go with them.
    pub fn delete_member(&mut self, id: MemberId) -> RepoResult<()> {
        let result = self.repo.delete_member(id);
        self.finish_write(EntityKind::Member, "delete", result)
    }

    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<()> {
        let result = self.repo.delete_task(id);
        self.finish_write(EntityKind::Task, "delete", result)
    }

    pub fn delete_meeting(&mut self, id: MeetingId) -> RepoResult<()> {
        let result = self.repo.delete_meeting(id);
        self.finish_write(EntityKind::Meeting, "delete", result)
    }

    pub fn delete_communication(&mut self, id: CommunicationId) -> RepoResult<()> {
        let result = self.repo.delete_communication(id);
        self.finish_write(EntityKind::Communication, "delete", result)
    }

    pub fn list_members(&self) -> RepoResult<Vec<Member>> {
        self.repo.list_members()
    }

    pub fn list_tasks(&self) -> RepoResult<Vec<TaskWithMember>> {
        self.repo.list_tasks_with_members()
    }

    pub fn list_meetings(&self) -> RepoResult<Vec<Meeting>> {
        self.repo.list_meetings()
    }

    pub fn list_communication(&self) -> RepoResult<Vec<CommunicationWithMember>> {
        self.repo.list_communication_with_members()
    }

    /// Query keys made stale by writes since the last call, in stable order.
    pub fn take_stale(&mut self) -> Vec<QueryKey> {
        self.stale.take()
    }

    fn finish_write<T>(
        &mut self,
        kind: EntityKind,
        action: &str,
        result: RepoResult<T>,
    ) -> RepoResult<T> {
        match &result {
            Ok(_) => {
                self.stale.mark_changed(kind);
                info!("event=record_{action} module=service status=ok kind={kind:?}");
            }
            Err(err) => {
                warn!(
                    "event=record_{action} module=service status=error kind={kind:?} error={err}"
                );
            }
        }
        result
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
