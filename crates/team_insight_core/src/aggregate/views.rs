//! Group-by-member reductions and per-meeting rows.

use crate::metrics::meeting_cost;
use crate::metrics::rounding::round_display_unsigned;
use crate::model::communication::CommunicationRecord;
use crate::model::meeting::{Meeting, MeetingId};
use crate::model::member::{Member, MemberId};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weighted workload of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub member_id: MemberId,
    pub member_name: String,
    pub total_workload: u64,
    pub task_count: u32,
}

/// Cost row for one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCost {
    pub meeting_id: MeetingId,
    pub title: String,
    /// Person-minutes.
    pub cost: u64,
    pub duration: u32,
    pub participants: u32,
}

/// Communication summary of one member, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCommunication {
    pub member_id: MemberId,
    pub member_name: String,
    /// Average over the member's records.
    pub messages_per_day: u32,
    /// Share of the member's records flagged after-hours, `0..=100`.
    pub after_hours_percentage: u32,
}

/// Groups tasks by member into weighted workload rows.
pub fn workload_per_member(members: &[Member], tasks: &[Task]) -> Vec<MemberWorkload> {
    let names = member_names(members);
    let mut order: HashMap<MemberId, usize> = HashMap::new();
    let mut rows: Vec<MemberWorkload> = Vec::new();

    for task in tasks {
        let Some(name) = names.get(&task.member_id) else {
            continue;
        };
        let index = match order.get(&task.member_id).copied() {
            Some(index) => index,
            None => {
                order.insert(task.member_id, rows.len());
                rows.push(MemberWorkload {
                    member_id: task.member_id,
                    member_name: (*name).to_string(),
                    total_workload: 0,
                    task_count: 0,
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[index];
        row.total_workload = row
            .total_workload
            .saturating_add(u64::from(task.urgency.weight()));
        row.task_count = row.task_count.saturating_add(1);
    }

    rows
}

/// One cost row per meeting, in input order.
pub fn meeting_costs(meetings: &[Meeting]) -> Vec<MeetingCost> {
    meetings
        .iter()
        .map(|meeting| MeetingCost {
            meeting_id: meeting.id,
            title: meeting.title.clone(),
            cost: meeting_cost(meeting.duration, meeting.participants),
            duration: meeting.duration,
            participants: meeting.participants,
        })
        .collect()
}

/// Groups communication records by member into rounded averages.
pub fn communication_per_member(
    members: &[Member],
    records: &[CommunicationRecord],
) -> Vec<MemberCommunication> {
    struct Accumulator<'a> {
        member_id: MemberId,
        member_name: &'a str,
        messages: u64,
        after_hours: u32,
        records: u32,
    }

    let names = member_names(members);
    let mut order: HashMap<MemberId, usize> = HashMap::new();
    let mut groups: Vec<Accumulator<'_>> = Vec::new();

    for record in records {
        let Some(name) = names.get(&record.member_id) else {
            continue;
        };
        let index = *order.entry(record.member_id).or_insert_with(|| {
            groups.push(Accumulator {
                member_id: record.member_id,
                member_name: *name,
                messages: 0,
                after_hours: 0,
                records: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[index];
        group.messages = group
            .messages
            .saturating_add(u64::from(record.messages_per_day));
        group.after_hours = group.after_hours.saturating_add(u32::from(record.after_hours));
        group.records = group.records.saturating_add(1);
    }

    groups
        .into_iter()
        .map(|group| {
            let count = f64::from(group.records);
            MemberCommunication {
                member_id: group.member_id,
                member_name: group.member_name.to_string(),
                messages_per_day: round_display_unsigned(group.messages as f64 / count),
                after_hours_percentage: round_display_unsigned(
                    f64::from(group.after_hours) / count * 100.0,
                ),
            }
        })
        .collect()
}

fn member_names(members: &[Member]) -> HashMap<MemberId, &str> {
    members
        .iter()
        .map(|member| (member.id, member.name.as_str()))
        .collect()
}
