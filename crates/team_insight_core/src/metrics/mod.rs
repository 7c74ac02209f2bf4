//! Pure metric calculators.
//!
//! # Responsibility
//! - Map raw task/meeting/communication records to category risk scores.
//! - Provide the totals and averages those scores are derived from.
//!
//! # Invariants
//! - Every function is deterministic and side-effect free.
//! - Each category risk lies in `[0, MAX_CATEGORY_RISK]`.
//! - Zero members yields zero risk, never NaN or a division fault.

use crate::model::communication::CommunicationRecord;
use crate::model::meeting::Meeting;
use crate::model::task::{Task, Urgency};

pub mod health;
pub mod rounding;

/// Upper bound of every category risk.
pub const MAX_CATEGORY_RISK: f64 = 33.0;
/// Upper bound of each half of the communication risk.
pub const MAX_COMMUNICATION_COMPONENT_RISK: f64 = MAX_CATEGORY_RISK / 2.0;

/// Average weighted workload per member at which workload risk saturates.
const WORKLOAD_SATURATION_PER_MEMBER: f64 = 10.0;
/// Average person-minutes per member at which meeting risk saturates.
const MEETING_COST_SATURATION_PER_MEMBER: f64 = 100.0;
/// Average messages per day at which the message component saturates.
const MESSAGES_SATURATION_PER_DAY: f64 = 50.0;

/// Workload units for one task of the given urgency.
pub fn workload_score(urgency: Urgency) -> u32 {
    urgency.weight()
}

/// Sum of urgency weights over a task set. Saturates at `u64::MAX`.
pub fn total_workload<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u64 {
    tasks
        .into_iter()
        .map(|task| u64::from(workload_score(task.urgency)))
        .fold(0, u64::saturating_add)
}

/// Person-minutes for one meeting.
pub fn meeting_cost(duration: u32, participants: u32) -> u64 {
    u64::from(duration) * u64::from(participants)
}

/// Sum of person-minutes over a meeting set. Saturates at `u64::MAX`.
pub fn total_meeting_cost<'a>(meetings: impl IntoIterator<Item = &'a Meeting>) -> u64 {
    meetings
        .into_iter()
        .map(|meeting| meeting_cost(meeting.duration, meeting.participants))
        .fold(0, u64::saturating_add)
}

/// Mean of `messages_per_day` over all records; `0.0` for no records.
pub fn average_messages_per_day(records: &[CommunicationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total = records
        .iter()
        .map(|record| u64::from(record.messages_per_day))
        .fold(0, u64::saturating_add);
    total as f64 / records.len() as f64
}

/// Share of records flagged after-hours, as `0..=100`; `0.0` for no records.
pub fn after_hours_percentage(records: &[CommunicationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let flagged = records.iter().filter(|record| record.after_hours).count();
    flagged as f64 / records.len() as f64 * 100.0
}

/// Workload risk: saturates once the per-member average exceeds 10 units.
pub fn workload_risk(total_workload: u64, member_count: usize) -> f64 {
    per_member_risk(
        total_workload as f64,
        member_count,
        WORKLOAD_SATURATION_PER_MEMBER,
    )
}

/// Meeting risk: saturates once the per-member average exceeds 100
/// person-minutes.
pub fn meeting_risk(total_meeting_cost: u64, member_count: usize) -> f64 {
    per_member_risk(
        total_meeting_cost as f64,
        member_count,
        MEETING_COST_SATURATION_PER_MEMBER,
    )
}

/// Communication risk: message volume and after-hours share, each worth
/// half of the category.
///
/// The message component saturates at 50 messages per day. The after-hours
/// component scales linearly with the percentage, which is clamped to
/// `0..=100`.
pub fn communication_risk(avg_messages_per_day: f64, after_hours_percentage: f64) -> f64 {
    let messages = avg_messages_per_day.max(0.0);
    let after_hours = after_hours_percentage.clamp(0.0, 100.0);

    let message_risk = (messages / MESSAGES_SATURATION_PER_DAY * MAX_COMMUNICATION_COMPONENT_RISK)
        .min(MAX_COMMUNICATION_COMPONENT_RISK);
    let after_hours_risk = after_hours / 100.0 * MAX_COMMUNICATION_COMPONENT_RISK;
    message_risk + after_hours_risk
}

fn per_member_risk(total: f64, member_count: usize, saturation: f64) -> f64 {
    if member_count == 0 {
        return 0.0;
    }
    let average = total / member_count as f64;
    (average / saturation * MAX_CATEGORY_RISK).min(MAX_CATEGORY_RISK)
}
